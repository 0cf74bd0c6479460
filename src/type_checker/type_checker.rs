use log::{debug, trace, warn};

use crate::{
    ast::{
        ast::{Node, NodeKind},
        types::{reconcile, Type, UnderlyingKind},
    },
    config::Options,
    errors::errors::{Error, ErrorImpl, Reporter},
    lexer::tokens::TokenKind,
    Position,
};

use super::{
    builtins::BuiltinRegistry,
    program::{
        BinaryOperation, Comparison, Function, IncDecOperation, Parameter, Program,
        TypeConversion, UnaryOperation,
    },
    scope::{link, ScopeArena, Variable, VariableKind},
};

/// Where an operator appears, which decides the operand kinds it accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OperatorPosition {
    Binary,
    Unary,
    IncDec,
    Comparison,
}

pub struct TypeChecker<'a, 'r> {
    pub scopes: ScopeArena,
    pub program: Program,
    pub builtins: &'a BuiltinRegistry,
    pub options: &'a Options,
    reporter: &'r mut dyn Reporter,
    /// Declared return types of the functions being checked, innermost last.
    return_types: Vec<Type>,
}

impl<'a, 'r> TypeChecker<'a, 'r> {
    pub fn new(
        module: &str,
        builtins: &'a BuiltinRegistry,
        options: &'a Options,
        reporter: &'r mut dyn Reporter,
    ) -> Self {
        TypeChecker {
            scopes: ScopeArena::new(),
            program: Program::new(module),
            builtins,
            options,
            reporter,
            return_types: vec![],
        }
    }

    pub fn report(&mut self, error: Error) {
        debug!("{}", error);
        self.reporter.report(error);
    }

    /// Resolves a source-level type name, reporting `UnknownType` on failure.
    fn resolve_type(&mut self, name: &str, position: &Position) -> Type {
        match Type::resolve(name) {
            Some(ty) => ty,
            None => {
                self.report(Error::new(
                    ErrorImpl::UnknownType {
                        type_: name.to_string(),
                    },
                    position.clone(),
                ));
                Type::error()
            }
        }
    }

    /// Reports `UndefinedOperator` unless `operator` accepts `ty` in the given
    /// position. Always passes when strict operator checking is off.
    fn check_operator(
        &mut self,
        operator: TokenKind,
        operator_position: OperatorPosition,
        ty: &Type,
        position: &Position,
    ) -> bool {
        if !self.options.strict_operators {
            return true;
        }

        let defined = ty
            .underlying()
            .is_some_and(|kind| operator_is_defined(operator, operator_position, kind));
        if !defined {
            self.report(Error::new(
                ErrorImpl::UndefinedOperator {
                    operator: operator.symbol().to_string(),
                    operand: ty.name.clone(),
                },
                position.clone(),
            ));
        }
        defined
    }

    /// Reports `InvalidTarget` unless `target` names a variable.
    fn check_target(&mut self, target: &Node) -> bool {
        if matches!(target.kind, NodeKind::Identifier { .. }) {
            return true;
        }
        self.report(Error::new(
            ErrorImpl::InvalidTarget {
                received: target.kind.name().to_string(),
            },
            target.position.clone(),
        ));
        false
    }

    fn unify(&mut self, observed: &[(Type, Position)]) -> Type {
        if observed.iter().any(|(ty, _)| ty.is_error()) {
            return Type::error();
        }
        match reconcile(observed) {
            Ok(ty) => ty,
            Err(error) => {
                self.report(error);
                Type::error()
            }
        }
    }
}

/// The operator table. Anything not listed here is undefined.
pub fn operator_is_defined(
    operator: TokenKind,
    operator_position: OperatorPosition,
    kind: UnderlyingKind,
) -> bool {
    match operator_position {
        OperatorPosition::Binary => match operator {
            TokenKind::Plus => kind.is_numeric() || kind == UnderlyingKind::String,
            TokenKind::Dash | TokenKind::Star | TokenKind::Slash => kind.is_numeric(),
            TokenKind::Percent => kind == UnderlyingKind::Integer,
            TokenKind::And | TokenKind::Or => kind == UnderlyingKind::Boolean,
            _ => false,
        },
        OperatorPosition::Unary => match operator {
            TokenKind::Dash => kind.is_numeric(),
            TokenKind::Not => kind == UnderlyingKind::Boolean,
            _ => false,
        },
        OperatorPosition::IncDec => operator.is_inc_dec() && kind.is_numeric(),
        OperatorPosition::Comparison if !operator.is_comparison() => false,
        OperatorPosition::Comparison => match operator {
            TokenKind::Equals | TokenKind::NotEquals => !matches!(
                kind,
                UnderlyingKind::Function | UnderlyingKind::Void | UnderlyingKind::Unresolved
            ),
            TokenKind::Less
            | TokenKind::LessEquals
            | TokenKind::Greater
            | TokenKind::GreaterEquals => kind.is_numeric() || kind == UnderlyingKind::String,
            _ => false,
        },
    }
}

/// Infers the type of `node`, writes it onto the node and returns it.
pub fn type_check_node(type_checker: &mut TypeChecker, node: &mut Node) -> Type {
    let ty = infer_node(type_checker, node);
    node.set_type(ty.clone());
    ty
}

fn infer_node(type_checker: &mut TypeChecker, node: &mut Node) -> Type {
    let position = node.position.clone();
    trace!("infer {} at {}", node.kind.name(), position);

    match &mut node.kind {
        NodeKind::Identifier { name, scope } => {
            let Some(scope) = *scope else {
                type_checker.report(Error::new(
                    ErrorImpl::UndefinedSymbol {
                        symbol: name.clone(),
                    },
                    position,
                ));
                return Type::error();
            };

            let found = type_checker
                .scopes
                .lookup(scope, name, &position)
                .map(|variable| variable.ty.clone());
            match found {
                Ok(ty) => ty,
                Err(error) => {
                    type_checker.report(error);
                    Type::error()
                }
            }
        }
        NodeKind::IntegerLiteral(_) => Type::int(),
        NodeKind::FloatLiteral(_) => Type::float(),
        NodeKind::BoolLiteral(_) => Type::boolean(),
        NodeKind::StringLiteral(value) => {
            if type_checker.program.add_string(value) {
                trace!("new string literal {:?}", value);
            }
            Type::string()
        }
        NodeKind::Datatype { datatype, .. } => type_checker.resolve_type(datatype, &position),
        NodeKind::Declaration {
            datatype,
            variable,
            value,
        } => {
            let declared = type_checker.resolve_type(datatype, &position);
            let value_type = type_check_node(type_checker, value);

            if !declared.is_error() && !value_type.is_error() {
                if let Err(error) = reconcile(&[
                    (declared.clone(), position.clone()),
                    (value_type, value.position.clone()),
                ]) {
                    type_checker.report(error);
                }
            }

            // Declared after the initializer, so `int x = x` only sees an outer `x`.
            if let NodeKind::Identifier {
                name,
                scope: Some(scope),
            } = &variable.kind
            {
                type_checker.scopes.create(
                    *scope,
                    name,
                    Variable::new(declared.clone(), VariableKind::Local),
                );
            }
            variable.set_type(declared.clone());

            declared
        }
        NodeKind::Assignment { target, value } => {
            let target_type = type_check_node(type_checker, target);
            let value_type = type_check_node(type_checker, value);
            if type_checker.check_target(target) {
                type_checker.unify(&[
                    (target_type, target.position.clone()),
                    (value_type, value.position.clone()),
                ]);
            }
            Type::void()
        }
        NodeKind::List { values } => {
            for value in values.iter_mut() {
                type_check_node(type_checker, value);
            }
            Type::void()
        }
        NodeKind::Block { body, .. } => {
            for statement in body.iter_mut() {
                type_check_node(type_checker, statement);
            }
            Type::void()
        }
        NodeKind::BinaryOp {
            operator,
            left,
            right,
        } => {
            let left_type = type_check_node(type_checker, left);
            let right_type = type_check_node(type_checker, right);
            let ty = type_checker.unify(&[
                (left_type, left.position.clone()),
                (right_type, right.position.clone()),
            ]);
            if ty.is_error()
                || !type_checker.check_operator(*operator, OperatorPosition::Binary, &ty, &position)
            {
                return Type::error();
            }

            let operation = BinaryOperation {
                module: type_checker.program.module.clone(),
                operator: *operator,
                left: ty.clone(),
                right: ty.clone(),
                ret: ty.clone(),
            };
            type_checker.program.binary_ops.push(operation);
            ty
        }
        NodeKind::UnaryOp { operator, value } => {
            let ty = type_check_node(type_checker, value);
            if ty.is_error()
                || !type_checker.check_operator(*operator, OperatorPosition::Unary, &ty, &position)
            {
                return Type::error();
            }

            let operation = UnaryOperation {
                module: type_checker.program.module.clone(),
                operator: *operator,
                value: ty.clone(),
                ret: ty.clone(),
            };
            type_checker.program.unary_ops.push(operation);
            ty
        }
        NodeKind::IncDec { operator, target } => {
            let ty = type_check_node(type_checker, target);
            if !type_checker.check_target(target)
                || ty.is_error()
                || !type_checker.check_operator(*operator, OperatorPosition::IncDec, &ty, &position)
            {
                return Type::error();
            }

            let operation = IncDecOperation {
                module: type_checker.program.module.clone(),
                operator: *operator,
                var: ty.clone(),
            };
            type_checker.program.inc_decs.push(operation);
            ty
        }
        NodeKind::Comparison {
            operator,
            left,
            right,
        } => {
            let left_type = type_check_node(type_checker, left);
            let right_type = type_check_node(type_checker, right);
            let ty = type_checker.unify(&[
                (left_type, left.position.clone()),
                (right_type, right.position.clone()),
            ]);
            if !ty.is_error()
                && type_checker.check_operator(*operator, OperatorPosition::Comparison, &ty, &position)
            {
                let comparison = Comparison {
                    module: type_checker.program.module.clone(),
                    operator: *operator,
                    left: ty.clone(),
                    right: ty,
                };
                type_checker.program.comparisons.push(comparison);
            }
            Type::boolean()
        }
        NodeKind::TypeCast { datatype, value } => {
            let from = type_check_node(type_checker, value);
            let to = type_checker.resolve_type(datatype, &position);
            if from.is_error() || to.is_error() {
                return to;
            }

            let castable = |ty: &Type| {
                !matches!(
                    ty.underlying(),
                    Some(UnderlyingKind::Function | UnderlyingKind::Void) | None
                )
            };
            if !castable(&from) || !castable(&to) {
                type_checker.report(Error::new(
                    ErrorImpl::InvalidCast {
                        from: from.name.clone(),
                        to: to.name.clone(),
                    },
                    position,
                ));
                return Type::error();
            }

            if from != to {
                let conversion = TypeConversion {
                    module: type_checker.program.module.clone(),
                    from,
                    to: to.clone(),
                };
                type_checker.program.type_convs.push(conversion);
            }
            to
        }
        NodeKind::FunctionLiteral {
            params,
            return_type,
            body,
            ..
        } => {
            let body_scope = match &body.kind {
                NodeKind::Block { scope, .. } => *scope,
                _ => None,
            };

            match &mut params.kind {
                NodeKind::List { values } => {
                    for param in values.iter_mut() {
                        let declared = match &param.kind {
                            NodeKind::Datatype {
                                datatype,
                                binding: Some(binding),
                            } => Some((datatype.clone(), binding.clone())),
                            _ => None,
                        };

                        let Some((datatype, binding)) = declared else {
                            type_checker.report(Error::new(
                                ErrorImpl::MalformedParameterList,
                                param.position.clone(),
                            ));
                            param.set_type(Type::error());
                            continue;
                        };

                        let mut ty = type_checker.resolve_type(&datatype, &param.position);
                        if ty.is_void() {
                            type_checker.report(Error::new(
                                ErrorImpl::VoidParameter {
                                    parameter: binding.clone(),
                                },
                                param.position.clone(),
                            ));
                            ty = Type::error();
                        }
                        if let Some(scope) = body_scope {
                            type_checker.scopes.create(
                                scope,
                                &binding,
                                Variable::new(ty.clone(), VariableKind::Param),
                            );
                        }
                        param.set_type(ty);
                    }
                }
                _ => {
                    type_checker.report(Error::new(
                        ErrorImpl::MalformedParameterList,
                        params.position.clone(),
                    ));
                }
            }
            params.set_type(Type::void());

            let ret = type_checker.resolve_type(return_type, &position);
            type_checker.return_types.push(ret);
            type_check_node(type_checker, body);
            type_checker.return_types.pop();

            Type::function()
        }
        NodeKind::FunctionCall { name, args } => {
            let arguments: Vec<(Type, Position)> = args
                .iter_mut()
                .map(|arg| (type_check_node(type_checker, arg), arg.position.clone()))
                .collect();

            let callee = if let Some(function) = type_checker.program.get_function(name) {
                Some((
                    function.params.iter().map(|param| param.ty.clone()).collect::<Vec<Type>>(),
                    function.ret.clone(),
                ))
            } else {
                type_checker
                    .builtins
                    .resolve(name)
                    .map(|builtin| (builtin.params.clone(), builtin.ret.clone()))
            };

            let Some((params, ret)) = callee else {
                type_checker.report(Error::new(
                    ErrorImpl::UndefinedFunction {
                        function: name.clone(),
                    },
                    position,
                ));
                return Type::error();
            };

            if params.len() != arguments.len() {
                type_checker.report(Error::new(
                    ErrorImpl::ArityMismatch {
                        function: name.clone(),
                        expected: params.len(),
                        received: arguments.len(),
                    },
                    position,
                ));
                return ret;
            }

            for (param, (argument, argument_position)) in params.iter().zip(arguments) {
                if param.is_error() || argument.is_error() || *param == argument {
                    continue;
                }
                type_checker.report(Error::new(
                    ErrorImpl::TypeMismatch {
                        expected: param.name.clone(),
                        received: argument.name.clone(),
                    },
                    argument_position,
                ));
            }
            ret
        }
        NodeKind::Return { value } => {
            let expected = type_checker.return_types.last().cloned();
            let received = match value {
                Some(value) => (type_check_node(type_checker, value), value.position.clone()),
                None => (Type::void(), position),
            };

            if let Some(expected) = expected {
                if !expected.is_error() && !received.0.is_error() && expected != received.0 {
                    type_checker.report(Error::new(
                        ErrorImpl::TypeMismatch {
                            expected: expected.name,
                            received: received.0.name,
                        },
                        received.1,
                    ));
                }
            }
            Type::void()
        }
        NodeKind::IfStatement {
            condition,
            then,
            otherwise,
        } => {
            let ty = type_check_node(type_checker, condition);
            if !ty.is_error() && ty != Type::boolean() {
                type_checker.report(Error::new(
                    ErrorImpl::NonBooleanCondition { received: ty.name },
                    condition.position.clone(),
                ));
            }

            type_check_node(type_checker, then);
            if let Some(otherwise) = otherwise {
                type_check_node(type_checker, otherwise);
            }
            Type::void()
        }
        NodeKind::Program { .. } => {
            // Only the root may be a program; `type_check` handles that one.
            warn!("checker gap: nested program at {} treated as void", position);
            Type::void()
        }
    }
}

/// Records the signature of every function literal in the tree.
///
/// Runs before inference so a call may appear before the function it calls.
/// Unknown parameter or return types, and `void` parameters, are recorded as
/// `<error>` and reported later, when the literal itself is checked. Nested
/// programs are skipped.
pub fn collect_functions(node: &Node, program: &mut Program) {
    if let NodeKind::FunctionLiteral {
        name,
        params,
        return_type,
        ..
    } = &node.kind
    {
        let params = match &params.kind {
            NodeKind::List { values } => values
                .iter()
                .filter_map(|param| match &param.kind {
                    NodeKind::Datatype {
                        datatype,
                        binding: Some(binding),
                    } => Some(Parameter {
                        name: binding.clone(),
                        ty: Type::resolve(datatype)
                            .filter(|ty| !ty.is_void())
                            .unwrap_or_else(Type::error),
                    }),
                    _ => None,
                })
                .collect(),
            _ => vec![],
        };

        debug!("collected function `{}` ({} params)", name, params.len());
        program.functions.push(Function {
            module: program.module.clone(),
            name: name.clone(),
            params,
            ret: Type::resolve(return_type).unwrap_or_else(Type::error),
            position: node.position.clone(),
        });
    }

    for child in node.children() {
        // Nested programs are not checked, so their functions are not callable.
        if matches!(child.kind, NodeKind::Program { .. }) {
            continue;
        }
        collect_functions(child, program);
    }
}

/// Runs the semantic passes over a parsed program.
///
/// Links scopes, collects function signatures, then infers a type for every
/// node. Errors go to `reporter` as they are found and checking always runs
/// to the end. Returns the populated scopes and the collected program facts.
pub fn type_check(
    ast: &mut Node,
    builtins: &BuiltinRegistry,
    options: &Options,
    reporter: &mut dyn Reporter,
) -> (ScopeArena, Program) {
    let module = match &ast.kind {
        NodeKind::Program { module, .. } => module.clone(),
        _ => String::from("main"),
    };

    let mut type_checker = TypeChecker::new(&module, builtins, options, reporter);
    link(ast, None, &mut type_checker.scopes);
    collect_functions(ast, &mut type_checker.program);

    match &mut ast.kind {
        NodeKind::Program { contents, .. } => {
            type_check_node(&mut type_checker, contents);
        }
        _ => {
            type_check_node(&mut type_checker, ast);
        }
    }
    if ast.ty.is_none() {
        ast.set_type(Type::void());
    }

    debug!(
        "checked `{}`: {} functions, {} strings, {} binary ops",
        module,
        type_checker.program.functions.len(),
        type_checker.program.strings.len(),
        type_checker.program.binary_ops.len()
    );

    (type_checker.scopes, type_checker.program)
}
