mod worker_pool;

pub use worker_pool::WorkerPool;
