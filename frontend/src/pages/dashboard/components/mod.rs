mod threads;

pub use threads::{render_threads, ThreadsSection};
