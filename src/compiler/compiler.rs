//! Main compiler module.
//!
//! This module contains the Compiler structure and the lowering pipeline from
//! the checked [`Program`] to an LLVM module. It owns the LLVM module, the
//! lookup tables the code generator resolves names through, and the type
//! mapping from language types to LLVM types.

use std::collections::HashMap;

use inkwell::{
    context::Context,
    module::{Linkage, Module},
    targets::TargetTriple,
    types::{ArrayType, BasicMetadataTypeEnum, BasicType, BasicTypeEnum, FunctionType},
    values::{FunctionValue, GlobalValue},
    AddressSpace,
};
use log::{debug, trace};

use crate::{
    ast::types::{Type, UnderlyingKind},
    config::Options,
    errors::errors::{Error, ErrorImpl},
    type_checker::{builtins::BuiltinRegistry, program::Program},
    Position,
};

use super::{
    globals::{declare_builtins, gen_functions, gen_strings},
    operators::{gen_binary_ops, gen_comparisons, gen_inc_decs, gen_type_convs, gen_unary_ops},
    registry::{OperatorEntry, OperatorTable},
};

/// A string literal emitted as a module global.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StringGlobal<'a> {
    pub global: GlobalValue<'a>,
    pub ty: ArrayType<'a>,
}

/// The state of one lowering run.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the LLVM context
pub struct Compiler<'a> {
    /// Reference to the LLVM context
    pub context: &'a Context,
    /// The LLVM module being built, named after the program module
    pub module: Module<'a>,

    /// String literal value to its global
    pub strings: HashMap<String, StringGlobal<'a>>,
    /// Source-level function name to its declaration. User functions shadow
    /// builtins of the same name.
    pub functions: HashMap<String, FunctionValue<'a>>,

    pub binary_ops: OperatorTable<'a>,
    pub unary_ops: OperatorTable<'a>,
    pub comparisons: OperatorTable<'a>,
    pub inc_decs: OperatorTable<'a>,
    pub type_convs: OperatorTable<'a>,
}

impl<'a> Compiler<'a> {
    pub fn new(context: &'a Context, module_name: &str) -> Self {
        Compiler {
            context,
            module: context.create_module(module_name),
            strings: HashMap::new(),
            functions: HashMap::new(),
            binary_ops: OperatorTable::new(),
            unary_ops: OperatorTable::new(),
            comparisons: OperatorTable::new(),
            inc_decs: OperatorTable::new(),
            type_convs: OperatorTable::new(),
        }
    }

    pub fn set_target_triple(&self, triple: &str) {
        self.module.set_triple(&TargetTriple::create(triple));
    }

    /// The textual IR of the module.
    pub fn print_to_string(&self) -> String {
        self.module.print_to_string().to_string()
    }

    /// Maps a value type of the language to its LLVM type.
    ///
    /// Strings, arrays and functions are passed around as `i8*`. `void` and
    /// unresolved types have no value representation.
    pub fn convert_type(&self, ty: &Type) -> Result<BasicTypeEnum<'a>, Error> {
        let i8_ptr_type = self.context.i8_type().ptr_type(AddressSpace::default());

        match ty.underlying() {
            Some(UnderlyingKind::Integer) => Ok(self.context.i64_type().into()),
            Some(UnderlyingKind::Float) => Ok(self.context.f64_type().into()),
            Some(UnderlyingKind::Boolean) => Ok(self.context.bool_type().into()),
            Some(UnderlyingKind::String | UnderlyingKind::Array | UnderlyingKind::Function) => {
                Ok(i8_ptr_type.into())
            }
            Some(UnderlyingKind::Void) => Err(Error::new(
                ErrorImpl::InvalidModule {
                    message: String::from("void has no value representation"),
                },
                Position::null(),
            )),
            Some(UnderlyingKind::Unresolved) | None => Err(Error::new(
                ErrorImpl::UnknownType {
                    type_: ty.name.clone(),
                },
                Position::null(),
            )),
        }
    }

    /// Builds the LLVM function type for `params -> ret`. A `void` return
    /// maps to an LLVM `void` function.
    pub fn function_type(&self, params: &[&Type], ret: &Type) -> Result<FunctionType<'a>, Error> {
        let mut converted_params: Vec<BasicMetadataTypeEnum> = vec![];
        for param in params {
            converted_params.push(self.convert_type(param)?.into());
        }

        if ret.is_void() {
            return Ok(self.context.void_type().fn_type(&converted_params, false));
        }
        Ok(self.convert_type(ret)?.fn_type(&converted_params, false))
    }

    /// Declares a function with external linkage, reusing an existing
    /// declaration of the same name.
    pub fn create_function_proto(
        &self,
        name: &str,
        function_type: FunctionType<'a>,
    ) -> FunctionValue<'a> {
        if let Some(function) = self.module.get_function(name) {
            return function;
        }

        trace!("declare {}", name);
        self.module
            .add_function(name, function_type, Some(Linkage::External))
    }

    /// Lowers one distinct operator signature.
    ///
    /// The operator is complex when its result type is complex. Complex
    /// operators get a helper declaration named `helper_name`, everything else
    /// is emitted inline at its uses.
    pub fn lower_operator(
        &self,
        signature: String,
        helper_name: &str,
        params: &[&Type],
        ret: &Type,
    ) -> Result<OperatorEntry<'a>, Error> {
        if !ret.is_complex() {
            trace!("inline operator `{}`", signature);
            return Ok(OperatorEntry::inline(signature));
        }

        let function_type = self.function_type(params, ret)?;
        let helper = self.create_function_proto(helper_name, function_type);
        Ok(OperatorEntry::helper(signature, helper))
    }

    /// Runs the LLVM verifier over the module.
    pub fn verify(&self) -> Result<(), Error> {
        self.module.verify().map_err(|message| {
            Error::new(
                ErrorImpl::InvalidModule {
                    message: message.to_string(),
                },
                Position::null(),
            )
        })
    }
}

/// Lowers a checked program into an LLVM module.
///
/// This is the entry point of code generation. It:
/// 1. Creates the module and sets the configured target triple
/// 2. Declares the builtins as external functions
/// 3. Emits one global per distinct string literal
/// 4. Declares every user function
/// 5. Registers each distinct operator signature, declaring helpers for
///    complex ones
/// 6. Verifies the module
///
/// Only call this for programs that checked without errors.
pub fn compile<'a>(
    program: &Program,
    builtins: &BuiltinRegistry,
    options: &Options,
    context: &'a Context,
) -> Result<Compiler<'a>, Error> {
    let mut compiler = Compiler::new(context, &program.module);
    if let Some(triple) = &options.target_triple {
        compiler.set_target_triple(triple);
    }

    declare_builtins(&mut compiler, builtins)?;
    gen_strings(&mut compiler, &program.strings);
    gen_functions(&mut compiler, &program.functions)?;

    gen_binary_ops(&mut compiler, &program.binary_ops)?;
    gen_unary_ops(&mut compiler, &program.unary_ops)?;
    gen_inc_decs(&mut compiler, &program.inc_decs)?;
    gen_type_convs(&mut compiler, &program.type_convs)?;
    gen_comparisons(&mut compiler, &program.comparisons);

    compiler.verify()?;

    debug!(
        "lowered `{}`: {} strings, {} functions, {} binary ops, {} unary ops",
        program.module,
        compiler.strings.len(),
        compiler.functions.len(),
        compiler.binary_ops.len(),
        compiler.unary_ops.len()
    );

    Ok(compiler)
}
