use std::{cell::RefCell, io::Write, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Builds the `cout` native over a shared output sink.
///
/// `cout` accepts any number of arguments. It writes the display form of
/// each one back to back with no separator, then a single newline, and
/// returns `Value::None`.
///
/// # Parameters
/// - `sink`: Where the output goes. Shared so the host can read it back.
///
/// # Example
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use sprig::interpreter::{evaluator::function::builtin::cout, value::core::Value};
///
/// let sink = Rc::new(RefCell::new(Vec::new()));
/// let print = cout(Rc::clone(&sink));
///
/// let result = print(&[Value::from("n = "), Value::Int(3)], 1).unwrap();
///
/// assert_eq!(result, Value::None);
/// assert_eq!(String::from_utf8(sink.borrow().clone()).unwrap(), "n = 3\n");
/// ```
pub fn cout<W>(sink: Rc<RefCell<W>>) -> impl Fn(&[Value], usize) -> EvalResult<Value>
    where W: Write + 'static
{
    move |args, line| {
        let mut out = sink.borrow_mut();
        for arg in args {
            write!(out, "{arg}").map_err(|e| output_error(&e, line))?;
        }
        writeln!(out).map_err(|e| output_error(&e, line))?;

        Ok(Value::None)
    }
}

fn output_error(error: &std::io::Error, line: usize) -> RuntimeError {
    RuntimeError::Output { details: error.to_string(),
                           line }
}
