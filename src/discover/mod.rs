pub mod docs_probe;
