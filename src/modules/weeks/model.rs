pub use jaarplan_models::weeks::*;
