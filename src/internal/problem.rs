//! The problem facade: owns the variable table and the compiled formula collection produced by
//! [`FormulaCompiler`](crate::internal::compiler::FormulaCompiler), and answers the only
//! question a solver ever needs to ask of it — how many formulas does this assignment satisfy.

use crate::internal::assignment::Assignment;
use crate::internal::command::CommandList;
use crate::internal::compiler::{Diagnostic, FormulaCompiler};
use crate::internal::errors::SatError;
use crate::internal::evaluator::evaluate;
use crate::internal::resolver::VariableTable;

/// A parsed, ready-to-solve SAT problem: a variable table and a list of compiled formulas.
pub struct SatProblem {
    variables: VariableTable,
    formulas: Vec<CommandList>,
    diagnostics: Vec<Diagnostic>,
}

impl SatProblem {
    /// Compiles `input` into a problem. Fails with [`SatError::Domain`] if parsing leaves no
    /// usable formulas or no variables — a formula-free or variable-free problem is not
    /// something any solver can search.
    pub fn parse(input: &str) -> Result<Self, SatError> {
        let (formulas, variables, diagnostics) = FormulaCompiler::new(input).compile();
        if formulas.is_empty() || variables.is_empty() {
            return Err(SatError::Domain);
        }
        Ok(SatProblem { variables, formulas, diagnostics })
    }

    pub fn var_count(&self) -> usize {
        self.variables.len()
    }

    pub fn var_name(&self, id: usize) -> &str {
        self.variables.name(id)
    }

    pub fn formula_count(&self) -> usize {
        self.formulas.len()
    }

    /// How many of this problem's formulas does `assignment` satisfy.
    pub fn satisfied_count(&self, assignment: &Assignment) -> usize {
        self.formulas.iter().filter(|cl| evaluate(cl, assignment)).count()
    }

    pub fn has_error(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::assignment::LongAssignment;

    fn assign(bits: u64, len: usize) -> Assignment<'static> {
        Assignment::Exhaustive(LongAssignment::new(bits, len))
    }

    #[test]
    fn parses_and_counts_variables_and_formulas() {
        let problem = SatProblem::parse("a & b; a | b;").unwrap();
        assert_eq!(problem.var_count(), 2);
        assert_eq!(problem.formula_count(), 2);
        assert!(!problem.has_error());
    }

    #[test]
    fn satisfied_count_tallies_every_formula() {
        let problem = SatProblem::parse("a & b; a | b;").unwrap();
        // a=true, b=true satisfies both
        assert_eq!(problem.satisfied_count(&assign(0b11, 2)), 2);
        // a=true, b=false satisfies only the OR
        assert_eq!(problem.satisfied_count(&assign(0b01, 2)), 1);
    }

    #[test]
    fn empty_input_is_a_domain_error() {
        assert!(matches!(SatProblem::parse(""), Err(SatError::Domain)));
    }

    #[test]
    fn wholly_malformed_input_is_a_domain_error() {
        // every formula fails to compile, so there's nothing to solve
        assert!(matches!(SatProblem::parse("& & &;"), Err(SatError::Domain)));
    }

    #[test]
    fn partial_failure_keeps_the_good_formula_and_records_a_diagnostic() {
        let problem = SatProblem::parse("a & ; b;").unwrap();
        assert_eq!(problem.formula_count(), 1);
        assert_eq!(problem.var_count(), 2);
        assert!(problem.has_error());
        assert_eq!(problem.diagnostics().len(), 1);
    }

    #[test]
    fn var_name_round_trips_through_the_variable_table() {
        let problem = SatProblem::parse("foo & bar;").unwrap();
        assert_eq!(problem.var_name(0), "foo");
        assert_eq!(problem.var_name(1), "bar");
    }
}
