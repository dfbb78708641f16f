//! Inputs to the status line: the stdin payload and workspace git state

pub(crate) mod git;
pub(crate) mod payload;

pub(crate) use git::GitContext;
pub(crate) use payload::Payload;
