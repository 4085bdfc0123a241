pub mod pool_options;
