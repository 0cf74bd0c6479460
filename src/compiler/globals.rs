//! Module-level declarations: builtins, string literals and user functions.

use inkwell::module::Linkage;
use log::{trace, warn};

use crate::{
    errors::errors::Error,
    type_checker::{builtins::BuiltinRegistry, program::Function},
};

use super::compiler::{Compiler, StringGlobal};

/// Declares every builtin as an external function under its own name.
pub fn declare_builtins(compiler: &mut Compiler, builtins: &BuiltinRegistry) -> Result<(), Error> {
    for builtin in builtins.iter() {
        let params: Vec<_> = builtin.params.iter().collect();
        let function_type = compiler.function_type(&params, &builtin.ret)?;
        let function = compiler.create_function_proto(&builtin.name, function_type);
        compiler.functions.insert(builtin.name.clone(), function);
    }
    Ok(())
}

/// Emits one private constant global per distinct string literal.
///
/// Globals are named `.str.<n>` in first-seen order and hold the raw bytes of
/// the literal without a trailing NUL.
pub fn gen_strings(compiler: &mut Compiler, strings: &[String]) {
    for value in strings {
        if compiler.strings.contains_key(value) {
            continue;
        }

        let name = format!(".str.{}", compiler.strings.len());
        let ty = compiler.context.i8_type().array_type(value.len() as u32);
        let global = compiler.module.add_global(ty, None, &name);
        global.set_linkage(Linkage::Private);
        global.set_constant(true);
        global.set_unnamed_addr(true);
        global.set_alignment(1);
        global.set_initializer(&compiler.context.const_string(value.as_bytes(), false));

        trace!("string {} = {:?}", name, value);
        compiler
            .strings
            .insert(value.clone(), StringGlobal { global, ty });
    }
}

/// Declares every user function as `module.name` and names its parameters.
///
/// A second function with an already declared name is skipped; the first
/// declaration wins, as it does during checking.
pub fn gen_functions(compiler: &mut Compiler, functions: &[Function]) -> Result<(), Error> {
    for function in functions {
        let name = function.mangled_name();
        if compiler.module.get_function(&name).is_some() {
            warn!("duplicate function `{}` at {}", name, function.position);
            continue;
        }

        let params: Vec<_> = function.params.iter().map(|param| &param.ty).collect();
        let function_type = compiler.function_type(&params, &function.ret)?;
        let declared = compiler.create_function_proto(&name, function_type);
        for (value, param) in declared.get_param_iter().zip(function.params.iter()) {
            value.set_name(&param.name);
        }

        compiler.functions.insert(function.name.clone(), declared);
    }
    Ok(())
}
