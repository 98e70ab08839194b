//! `print(*args, sep=' ', end='\n')` (spec.md §5.9).
//!
//! loom has no keyword arguments (a stated non-goal), so `sep`/`end` aren't
//! reachable from user code; this still renders multi-argument calls with
//! Python's default separator and trailing newline.

use crate::error::InterpreterError;
use crate::repr;
use crate::value::Value;

pub fn print(args: &[Value]) -> Result<Value, InterpreterError> {
    let rendered: Vec<String> = args.iter().map(repr::display).collect();
    println!("{}", rendered.join(" "));
    Ok(Value::None)
}
