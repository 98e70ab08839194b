//! Import resolution (spec.md §6.2): a dotted module name resolves to a
//! `.loom` file under the interpreter's base directory (the non-goal on a
//! real module search path means this is always just the current working
//! directory, not `sys.path`). Loaded modules are cached by resolved path so
//! re-importing the same file doesn't re-execute it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use crate::error::InterpreterError;
use crate::interpreter::Interpreter;
use crate::lexer;
use crate::parser;
use crate::scope::Scope;
use crate::value::{ModuleValue, Value};

pub struct ModuleLoader {
    base_dir: PathBuf,
    cache: RefCell<HashMap<PathBuf, Value>>,
}

impl ModuleLoader {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir, cache: RefCell::new(HashMap::new()) }
    }

    pub fn load(&self, dotted_name: &str, interpreter: &Interpreter) -> Result<Value, InterpreterError> {
        let path = self.resolve(dotted_name)?;

        if let Some(cached) = self.cache.borrow().get(&path) {
            return Ok(cached.clone());
        }

        let source = fs::read_to_string(&path)
            .map_err(|_| InterpreterError::import(format!("No module named '{dotted_name}'")))?;

        let tokens = lexer::tokenize(&source).map_err(|err| InterpreterError::import(err.to_string()))?;
        let module = parser::parse(&source, tokens).map_err(|err| InterpreterError::import(err.to_string()))?;

        let scope = Scope::new(None);
        let value = Value::Module(Rc::new(ModuleValue { name: dotted_name.to_owned(), scope: scope.clone() }));
        self.cache.borrow_mut().insert(path.clone(), value.clone());

        interpreter.exec_module(&module, &scope)?;

        Ok(value)
    }

    fn resolve(&self, dotted_name: &str) -> Result<PathBuf, InterpreterError> {
        let relative: PathBuf = dotted_name.split('.').collect();
        let path = self.base_dir.join(relative).with_extension("loom");
        if path.is_file() {
            Ok(path)
        } else {
            Err(InterpreterError::import(format!("No module named '{dotted_name}'")))
        }
    }
}
