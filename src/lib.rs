pub mod console;
pub mod decoder;
pub mod disasm;
pub mod exec;
pub mod instructions;
pub mod labels;
pub mod machine;
pub mod memory;
pub mod operand;
pub mod pattern;
pub mod program;
pub mod token;

/// Machine word: 64-bit two's complement.
pub type Word = i64;

pub use console::{Console, ScriptedConsole, StdConsole};
pub use decoder::{Decoder, LineDecoder};
pub use exec::{Executor, IntExecutor};
pub use machine::{Fault, Machine, MachineConfig, Step};
pub use memory::Store;
pub use program::{Program, RunSummary};
