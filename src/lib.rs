pub mod bench_args;
pub mod build_info;
pub mod cache;
pub mod collection;
pub mod distances;
pub mod error;
pub mod extract;
pub mod pairwise;
pub mod precompute;
pub mod util;
