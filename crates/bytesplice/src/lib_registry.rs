// Method registration for the dynamic string library
// Maps method names to Rust functions and dispatches calls on a subject

use std::collections::HashMap;

use ahash::RandomState;

use crate::byte_string::ByteString;
use crate::error::{SpliceError, SpliceResult};
use crate::option::SpliceOption;
use crate::string_lib;
use crate::value::Value;

/// A caller-supplied block; each call receives one produced value.
pub type Block<'b> = dyn FnMut(Value) -> SpliceResult<Value> + 'b;

/// Signature shared by every registered method.
pub type MethodFn = fn(&mut CallContext<'_, '_>) -> SpliceResult<Value>;

/// Everything a method body sees for one call.
pub struct CallContext<'c, 'b> {
    pub(crate) subject: &'c mut ByteString,
    pub(crate) args: &'c [Value],
    pub(crate) block: Option<&'c mut Block<'b>>,
    pub(crate) option: &'c SpliceOption,
}

impl<'c> CallContext<'c, '_> {
    #[inline]
    pub fn args(&self) -> &'c [Value] {
        self.args
    }

    #[inline]
    pub fn arg(&self, index: usize) -> Option<&'c Value> {
        self.args.get(index)
    }

    #[inline]
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    #[inline]
    pub fn has_block(&self) -> bool {
        self.block.is_some()
    }

    pub fn subject(&self) -> &ByteString {
        self.subject
    }

    /// Fails with ArgumentCount unless `min <= argc <= max`.
    pub fn check_arity(&self, min: usize, max: usize, expected: &'static str) -> SpliceResult<()> {
        SpliceError::check_arity(self.args.len(), min, max, expected)
    }
}

/// A named group of methods.
pub struct MethodModule {
    pub name: &'static str,
    pub entries: Vec<(&'static str, MethodFn)>,
}

impl MethodModule {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    pub fn with_method(mut self, name: &'static str, func: MethodFn) -> Self {
        self.entries.push((name, func));
        self
    }
}

/// Builder for method modules
#[macro_export]
macro_rules! method_module {
    ($name:expr, {
        $($method_name:expr => $method:expr),* $(,)?
    }) => {{
        let mut module = $crate::lib_registry::MethodModule::new($name);
        $(
            module.entries.push(($method_name, $method));
        )*
        module
    }};
}

/// Dispatcher holding the method table and the limits every call runs under.
pub struct StringLib {
    methods: HashMap<&'static str, MethodFn, RandomState>,
    option: SpliceOption,
}

impl StringLib {
    pub fn new() -> Self {
        Self::with_option(SpliceOption::default())
    }

    pub fn with_option(option: SpliceOption) -> Self {
        let mut lib = Self {
            methods: HashMap::with_hasher(RandomState::new()),
            option,
        };
        lib.register(string_lib::create_string_lib());
        lib
    }

    /// Add (or override) every method of `module`.
    pub fn register(&mut self, module: MethodModule) {
        tracing::trace!(module = module.name, count = module.entries.len(), "register methods");
        for (name, func) in module.entries {
            self.methods.insert(name, func);
        }
    }

    pub fn option(&self) -> &SpliceOption {
        &self.option
    }

    pub fn responds_to(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn method_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.methods.keys().copied()
    }

    /// Invoke `name` on `subject`.
    pub fn call(
        &self,
        name: &str,
        subject: &mut ByteString,
        args: &[Value],
        block: Option<&mut Block<'_>>,
    ) -> SpliceResult<Value> {
        let Some(method) = self.methods.get(name) else {
            return Err(SpliceError::NoMethod(name.to_string()));
        };
        tracing::trace!(method = name, argc = args.len(), block = block.is_some(), "call");
        let mut ctx = CallContext {
            subject,
            args,
            block,
            option: &self.option,
        };
        method(&mut ctx)
    }
}

impl Default for StringLib {
    fn default() -> Self {
        Self::new()
    }
}
