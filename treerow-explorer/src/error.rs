use std::io;

use thiserror::Error;
use treerow::{StoreError, TreeError};

use crate::commands::CommandError;
use crate::state::StateError;

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("state file: {0}")]
    State(#[from] StateError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("row {0} is not a directory")]
    NotADirectory(usize),
}
