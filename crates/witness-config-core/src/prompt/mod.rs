//! Interactive acquisition flow, expressed without any terminal I/O.

pub mod machine;

pub use machine::{
    interval_menu, prompt_text, transition, Defaults, Draft, InputError, Patch, Progress, Session,
    Step, Transition,
};
