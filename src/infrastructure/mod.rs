pub mod console_presenter;
pub mod snapshot_reader;

pub use console_presenter::ConsolePresenter;
pub use snapshot_reader::{
    forward_snapshots, forward_snapshots_blocking, parse_snapshot, spawn_stdin_reader,
};
