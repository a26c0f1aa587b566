pub mod snapshot_ops;
