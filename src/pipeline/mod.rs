// Analysis pipeline: collect -> normalize -> classify -> aggregate.

pub mod analyze;
