//! Registration of operator signatures.
//!
//! Each list from the checked program holds one entry per use. Only the first
//! use of a signature is lowered, later uses share its entry.

use crate::{
    errors::errors::Error,
    type_checker::program::{
        BinaryOperation, Comparison, IncDecOperation, TypeConversion, UnaryOperation,
    },
};

use super::{compiler::Compiler, registry::OperatorEntry};

pub fn gen_binary_ops(compiler: &mut Compiler, operations: &[BinaryOperation]) -> Result<(), Error> {
    for operation in operations {
        let signature = operation.signature();
        if compiler.binary_ops.contains(&signature) {
            continue;
        }

        let entry = compiler.lower_operator(
            signature,
            &operation.helper_name(),
            &[&operation.left, &operation.right],
            &operation.ret,
        )?;
        compiler.binary_ops.register(entry);
    }
    Ok(())
}

pub fn gen_unary_ops(compiler: &mut Compiler, operations: &[UnaryOperation]) -> Result<(), Error> {
    for operation in operations {
        let signature = operation.signature();
        if compiler.unary_ops.contains(&signature) {
            continue;
        }

        let entry = compiler.lower_operator(
            signature,
            &operation.helper_name(),
            &[&operation.value],
            &operation.ret,
        )?;
        compiler.unary_ops.register(entry);
    }
    Ok(())
}

/// Increments and decrements take the variable's value and return the
/// updated value.
pub fn gen_inc_decs(compiler: &mut Compiler, operations: &[IncDecOperation]) -> Result<(), Error> {
    for operation in operations {
        let signature = operation.signature();
        if compiler.inc_decs.contains(&signature) {
            continue;
        }

        let entry = compiler.lower_operator(
            signature,
            &operation.helper_name(),
            &[&operation.var],
            &operation.var,
        )?;
        compiler.inc_decs.register(entry);
    }
    Ok(())
}

pub fn gen_type_convs(compiler: &mut Compiler, conversions: &[TypeConversion]) -> Result<(), Error> {
    for conversion in conversions {
        let signature = conversion.signature();
        if compiler.type_convs.contains(&signature) {
            continue;
        }

        let entry = compiler.lower_operator(
            signature,
            &conversion.helper_name(),
            &[&conversion.from],
            &conversion.to,
        )?;
        compiler.type_convs.register(entry);
    }
    Ok(())
}

/// Comparisons always produce a `bool` and are emitted inline, even for
/// string operands.
// TODO: declare helpers for string comparisons once string equality is lowered.
pub fn gen_comparisons(compiler: &mut Compiler, comparisons: &[Comparison]) {
    for comparison in comparisons {
        compiler
            .comparisons
            .register(OperatorEntry::inline(comparison.signature()));
    }
}
