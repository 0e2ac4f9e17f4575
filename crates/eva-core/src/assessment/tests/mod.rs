mod common;
mod flags;
