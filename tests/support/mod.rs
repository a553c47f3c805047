pub mod edgesense_env;
