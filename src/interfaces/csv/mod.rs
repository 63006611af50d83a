pub mod call_reader;
pub mod state_writer;
