mod environment;
mod object;

pub use environment::{Environment, ScopeId};
pub use object::{Function, Object, ObjectType};

use crate::parser::ast::{BlockStatement, Expression, Program, Statement};
use std::rc::Rc;

#[cfg(test)]
mod test;

const TRUE: Object = Object::Boolean(true);
const FALSE: Object = Object::Boolean(false);
const NULL: Object = Object::Null;

/// Evaluates a program against the environment's root scope. Bindings made
/// here persist in the environment, so successive programs evaluated against
/// the same environment see each other's variables.
pub fn evaluate(program: &Program, env: &mut Environment) -> Object {
    eval_program(program, env, Environment::GLOBAL)
}

fn eval_program(program: &Program, env: &mut Environment, scope: ScopeId) -> Object {
    let mut result = NULL;
    for statement in &program.statements {
        result = eval_statement(statement, env, scope);
        if matches!(result, Object::Return(_)) {
            return result;
        }
    }
    result
}

fn eval_statement(statement: &Statement, env: &mut Environment, scope: ScopeId) -> Object {
    match statement {
        Statement::Let { name, value, .. } => {
            let value = eval_opt(value.as_ref(), env, scope);
            env.set(scope, name.value.clone(), value.clone());
            value
        }
        Statement::Return { value, .. } => {
            let value = eval_opt(value.as_ref(), env, scope);
            Object::Return(Box::new(value))
        }
        Statement::Expression { expression, .. } => eval_opt(expression.as_ref(), env, scope),
        Statement::Block(block) => eval_block(block, env, scope),
        Statement::While {
            condition, body, ..
        } => {
            let mut result = NULL;
            while is_truthy(&eval_opt(condition.as_ref(), env, scope)) {
                result = eval_block(body, env, scope);
                if matches!(result, Object::Return(_)) {
                    return result;
                }
            }
            result
        }
        Statement::For {
            init,
            condition,
            increment,
            body,
            ..
        } => {
            let mut result = NULL;
            if let Some(init) = init {
                eval_statement(init, env, scope);
            }
            loop {
                // an absent condition never stops the loop
                if let Some(condition) = condition {
                    if !is_truthy(&eval_expression(condition, env, scope)) {
                        break;
                    }
                }
                result = eval_block(body, env, scope);
                if matches!(result, Object::Return(_)) {
                    return result;
                }
                if let Some(increment) = increment {
                    eval_statement(increment, env, scope);
                }
            }
            result
        }
    }
}

/// Blocks thread the caller's scope and short-circuit the moment a statement
/// yields a `Return` wrapper; this is how `return` unwinds through nested
/// blocks and loop bodies.
fn eval_block(block: &BlockStatement, env: &mut Environment, scope: ScopeId) -> Object {
    let mut result = NULL;
    for statement in &block.statements {
        result = eval_statement(statement, env, scope);
        if matches!(result, Object::Return(_)) {
            return result;
        }
    }
    result
}

fn eval_opt(expression: Option<&Expression>, env: &mut Environment, scope: ScopeId) -> Object {
    match expression {
        Some(expression) => eval_expression(expression, env, scope),
        None => NULL,
    }
}

fn eval_expression(expression: &Expression, env: &mut Environment, scope: ScopeId) -> Object {
    match expression {
        Expression::IntegerLiteral { value, .. } => Object::Integer(*value),
        Expression::BooleanLiteral { value, .. } => native_bool(*value),
        Expression::Identifier(identifier) => {
            env.get(scope, &identifier.value).unwrap_or(NULL)
        }
        Expression::Prefix {
            operator, right, ..
        } => {
            let right = eval_opt(right.as_deref(), env, scope);
            eval_prefix(operator, right)
        }
        Expression::Infix {
            left,
            operator,
            right,
            ..
        } => {
            let left = eval_expression(left, env, scope);
            let right = eval_opt(right.as_deref(), env, scope);
            eval_infix(operator, left, right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
            ..
        } => {
            let condition = eval_opt(condition.as_deref(), env, scope);
            if is_truthy(&condition) {
                eval_block(consequence, env, scope)
            } else if let Some(alternative) = alternative {
                eval_block(alternative, env, scope)
            } else {
                NULL
            }
        }
        Expression::FunctionLiteral {
            parameters, body, ..
        } => Object::Function(Rc::new(Function {
            parameters: parameters.clone(),
            body: body.clone(),
            scope,
        })),
        Expression::Call {
            function,
            arguments,
            ..
        } => eval_call(function, arguments, env, scope),
    }
}

fn eval_call(
    function: &Expression,
    arguments: &[Expression],
    env: &mut Environment,
    scope: ScopeId,
) -> Object {
    let Object::Function(function) = eval_expression(function, env, scope) else {
        return NULL;
    };
    let mut args = Vec::with_capacity(arguments.len());
    for argument in arguments {
        args.push(eval_expression(argument, env, scope));
    }
    // arity mismatch degrades to null, like every other soft error
    if args.len() != function.parameters.len() {
        return NULL;
    }
    let call_scope = env.enclosed(function.scope);
    for (parameter, arg) in function.parameters.iter().zip(args) {
        env.set(call_scope, parameter.value.clone(), arg);
    }
    match eval_block(&function.body, env, call_scope) {
        Object::Return(value) => *value,
        other => other,
    }
}

fn eval_prefix(operator: &str, right: Object) -> Object {
    match operator {
        "!" => eval_bang(right),
        "-" => match right {
            Object::Integer(value) => Object::Integer(value.wrapping_neg()),
            _ => NULL,
        },
        _ => NULL,
    }
}

fn eval_bang(right: Object) -> Object {
    match right {
        Object::Boolean(true) => FALSE,
        Object::Boolean(false) => TRUE,
        Object::Null => TRUE,
        _ => FALSE,
    }
}

fn eval_infix(operator: &str, left: Object, right: Object) -> Object {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix(operator, *l, *r),
        _ => match operator {
            "==" => native_bool(identical(&left, &right)),
            "!=" => native_bool(!identical(&left, &right)),
            _ => NULL,
        },
    }
}

fn eval_integer_infix(operator: &str, left: i32, right: i32) -> Object {
    match operator {
        "+" => Object::Integer(left.wrapping_add(right)),
        "-" => Object::Integer(left.wrapping_sub(right)),
        "*" => Object::Integer(left.wrapping_mul(right)),
        // division by zero is left unguarded: the panic unwinds out of
        // evaluation and the REPL reports it at the session boundary
        "/" => Object::Integer(left.wrapping_div(right)),
        "<" => native_bool(left < right),
        ">" => native_bool(left > right),
        "<=" => native_bool(left <= right),
        ">=" => native_bool(left >= right),
        "==" => native_bool(left == right),
        "!=" => native_bool(left != right),
        _ => NULL,
    }
}

/// Identity comparison for the non-integer `==`/`!=` path: booleans and null
/// compare as singletons, functions and strings by reference. Everything
/// else is never identical.
fn identical(left: &Object, right: &Object) -> bool {
    match (left, right) {
        (Object::Boolean(l), Object::Boolean(r)) => l == r,
        (Object::Null, Object::Null) => true,
        (Object::Function(l), Object::Function(r)) => Rc::ptr_eq(l, r),
        (Object::Str(l), Object::Str(r)) => Rc::ptr_eq(l, r),
        _ => false,
    }
}

// Null and false are falsy; everything else, including 0, is truthy.
fn is_truthy(object: &Object) -> bool {
    match object {
        Object::Null => false,
        Object::Boolean(value) => *value,
        _ => true,
    }
}

fn native_bool(value: bool) -> Object {
    if value {
        TRUE
    } else {
        FALSE
    }
}
