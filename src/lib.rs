pub mod machine;
pub mod program;
pub mod search;
