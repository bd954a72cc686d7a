use pretty::RcDoc;

use super::{enclose, list, PrettyPrint};
use crate::{
    environment::Environment,
    language::{Expression, Operator, Statement, Variable},
};

impl PrettyPrint for Variable {
    fn to_doc(&self) -> RcDoc<'_, ()> {
        RcDoc::text(&self.0)
    }
}

impl PrettyPrint for Expression {
    fn to_doc(&self) -> RcDoc<'_, ()> {
        match self {
            Self::Number(n) => RcDoc::as_string(n),
            Self::Boolean(b) => RcDoc::as_string(b),
            Self::Variable(var) => var.to_doc(),
            Self::Add(left, right) => binary(Operator::Add, left, right),
            Self::Multiply(left, right) => binary(Operator::Multiply, left, right),
            Self::LessThan(left, right) => binary(Operator::LessThan, left, right),
        }
    }
}

// Operators associate to the left, so a right operand of equal precedence
// needs parentheses to keep its shape.
fn binary<'a>(op: Operator, left: &'a Expression, right: &'a Expression) -> RcDoc<'a, ()> {
    operand(left, left.precedence() < op.precedence())
        .append(RcDoc::space())
        .append(RcDoc::as_string(op))
        .append(RcDoc::space())
        .append(operand(right, right.precedence() <= op.precedence()))
}

fn operand(expr: &Expression, parenthesise: bool) -> RcDoc<'_, ()> {
    if parenthesise {
        enclose("(", expr.to_doc(), ")")
    } else {
        expr.to_doc()
    }
}

impl PrettyPrint for Statement {
    fn to_doc(&self) -> RcDoc<'_, ()> {
        match self {
            Self::DoNothing => RcDoc::text("do-nothing"),
            Self::Assign { name, expression } => name
                .to_doc()
                .append(RcDoc::space())
                .append(RcDoc::text("="))
                .append(RcDoc::space())
                .append(expression.to_doc()),
            Self::If {
                condition,
                consequence,
                alternative,
            } => RcDoc::text("if")
                .append(RcDoc::space())
                .append(condition.to_doc())
                .append(RcDoc::space())
                .append(RcDoc::text("{"))
                .append(RcDoc::line().append(consequence.to_doc()).nest(4))
                .append(RcDoc::line())
                .append(RcDoc::text("} else {"))
                .append(RcDoc::line().append(alternative.to_doc()).nest(4))
                .append(RcDoc::line())
                .append(RcDoc::text("}"))
                .group(),
        }
    }
}

impl PrettyPrint for Environment {
    fn to_doc(&self) -> RcDoc<'_, ()> {
        let bindings = self.iter().map(|(name, value)| {
            name.to_doc()
                .append(RcDoc::text(":"))
                .append(RcDoc::space())
                .append(value.to_doc())
        });
        enclose("{", list(bindings), "}")
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use crate::{
        language::{Expression, Statement},
        prettyprinter::PrettyPrint,
    };

    fn branch() -> Statement {
        Statement::if_else(
            Expression::less_than(Expression::variable("x"), Expression::Number(3)),
            Statement::assign(
                "y",
                Expression::multiply(Expression::variable("x"), Expression::Number(2)),
            ),
            Statement::DoNothing,
        )
    }

    #[test]
    fn if_fits_on_one_line() {
        assert_snapshot!(branch().to_pretty_width(80), @"if x < 3 { y = x * 2 } else { do-nothing }");
    }

    #[test]
    fn if_breaks_when_narrow() {
        assert_snapshot!(branch().to_pretty_width(20), @r"
        if x < 3 {
            y = x * 2
        } else {
            do-nothing
        }
        ");
    }

    #[test]
    fn nested_if_breaks_outside_in() {
        let stmt = Statement::if_else(
            Expression::variable("a"),
            branch(),
            Statement::assign("y", Expression::Number(0)),
        );
        assert_snapshot!(stmt.to_pretty_width(50), @r"
        if a {
            if x < 3 { y = x * 2 } else { do-nothing }
        } else {
            y = 0
        }
        ");
    }
}
