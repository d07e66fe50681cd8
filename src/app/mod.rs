// Application layer: import pipelines and interactive edits wired to the domain ports.

pub mod editing;
pub mod pipelines;
