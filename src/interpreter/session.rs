use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
};

use crate::{
    config::Config,
    error::Error,
    interpreter::{
        evaluator::{
            core::{EvalResult, Evaluator},
            function::builtin,
        },
        parser::core::parse_source,
        value::core::Value,
    },
};

/// A long-lived interpreter.
///
/// A session owns one [`Evaluator`] with `cout` already registered. Every
/// call to [`Session::run`] parses a whole program before running any of
/// it, and runs it against the same global scope and function registry as
/// the runs before it.
///
/// # Example
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use sprig::{Session, config::Config, interpreter::value::core::Value};
///
/// let output = Rc::new(RefCell::new(Vec::new()));
/// let mut session = Session::with_output(Config::default(), Rc::clone(&output));
///
/// session.run("fn double(x: num) num (return x * 2;)").unwrap();
/// let value = session.run("cout(double(21)); double(4);").unwrap();
///
/// assert_eq!(value, Value::Int(8));
/// assert_eq!(String::from_utf8(output.borrow().clone()).unwrap(), "42\n");
/// ```
pub struct Session {
    evaluator: Evaluator,
}

impl Session {
    /// Creates a session whose `cout` writes to standard output.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_output(config, Rc::new(RefCell::new(io::stdout())))
    }

    /// Creates a session whose `cout` writes to `sink`.
    #[must_use]
    pub fn with_output<W>(config: Config, sink: Rc<RefCell<W>>) -> Self
        where W: Write + 'static
    {
        let mut evaluator = Evaluator::new(config);
        evaluator.functions_mut()
                 .register_native("cout", builtin::cout(sink));

        Self { evaluator }
    }

    /// Registers an additional native function. Natives take priority over
    /// declared functions of the same name.
    pub fn register_native<F>(&mut self, name: impl Into<String>, native: F)
        where F: Fn(&[Value], usize) -> EvalResult<Value> + 'static
    {
        self.evaluator.functions_mut().register_native(name, native);
    }

    /// Parses and runs `source`.
    ///
    /// # Returns
    /// The value of the last top-level statement.
    ///
    /// # Errors
    /// `Error::Parse` if the source does not parse, in which case nothing
    /// runs, or `Error::Runtime` for the first failure during evaluation.
    pub fn run(&mut self, source: &str) -> Result<Value, Error> {
        let program = parse_source(source)?;
        Ok(self.evaluator.run(&program)?)
    }

    /// The underlying evaluator.
    #[must_use]
    pub const fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }
}
