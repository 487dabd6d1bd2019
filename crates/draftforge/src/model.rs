//! Integer-program formulation of one lineup selection.
//!
//! One binary variable per eligible player. The base constraints (salary,
//! position windows, flex total) are added once; every accepted lineup adds
//! one exclusion inequality that stays for all later solves.

use std::collections::{BTreeSet, HashMap};

use draftforge_core::{
    DraftForgeError, Lineup, Player, PlayerId, PlayerPool, Position, Result, RosterRules,
};
use draftforge_solver::{
    BinaryProgram, BinarySolution, ConstraintSense, LinearExpr, ModelError, VarId,
};
use tracing::debug;

use crate::result::ConstraintEvaluation;

/// Binary program for a pool, a roster template and a salary cap.
#[derive(Debug, Clone)]
pub struct LineupModel {
    program: BinaryProgram,
    players: Vec<PlayerId>,
    vars: HashMap<PlayerId, VarId>,
    exclusions: Vec<BTreeSet<PlayerId>>,
    max_overlap: u32,
}

impl LineupModel {
    /// Formulates the base model.
    ///
    /// Players whose position the roster does not govern get no variable.
    pub fn build(
        pool: &PlayerPool,
        roster: &RosterRules,
        salary_cap: u32,
        max_overlap: u32,
    ) -> Result<Self> {
        let mut program = BinaryProgram::new("lineup");
        let mut players = Vec::new();
        let mut vars = HashMap::new();
        let mut by_position: HashMap<&Position, Vec<VarId>> = HashMap::new();

        for player in pool.iter().filter(|p| roster.governs(p.position())) {
            let var = program.add_variable(player.id());
            program
                .set_objective(var, player.projected_score())
                .map_err(model_error)?;
            by_position.entry(player.position()).or_default().push(var);
            players.push(player.id().to_string());
            vars.insert(player.id().to_string(), var);
        }

        let salary: LinearExpr = pool
            .iter()
            .filter_map(|p| vars.get(p.id()).map(|&v| (v, f64::from(p.salary()))))
            .collect();
        program
            .add_constraint(
                "salary",
                salary,
                ConstraintSense::LessOrEqual,
                f64::from(salary_cap),
            )
            .map_err(model_error)?;

        for limit in &roster.limits {
            let members = by_position.get(&limit.position).cloned().unwrap_or_default();
            let code = limit.position.code().to_lowercase();
            if limit.is_exact() {
                program
                    .add_constraint(
                        format!("{code}_count"),
                        LinearExpr::sum(members),
                        ConstraintSense::Equal,
                        f64::from(limit.min),
                    )
                    .map_err(model_error)?;
            } else {
                program
                    .add_constraint(
                        format!("{code}_min"),
                        LinearExpr::sum(members.iter().copied()),
                        ConstraintSense::GreaterOrEqual,
                        f64::from(limit.min),
                    )
                    .map_err(model_error)?;
                program
                    .add_constraint(
                        format!("{code}_max"),
                        LinearExpr::sum(members),
                        ConstraintSense::LessOrEqual,
                        f64::from(limit.max),
                    )
                    .map_err(model_error)?;
            }
        }

        if let Some(flex) = &roster.flex {
            let members = flex
                .positions
                .iter()
                .filter_map(|position| by_position.get(position))
                .flatten()
                .copied();
            program
                .add_constraint(
                    "flex_count",
                    LinearExpr::sum(members),
                    ConstraintSense::Equal,
                    f64::from(flex.count),
                )
                .map_err(model_error)?;
        }

        debug!(
            event = "model_built",
            variables = program.variable_count(),
            constraints = program.constraint_count(),
            ignored_players = pool.len() - players.len()
        );

        Ok(Self {
            program,
            players,
            vars,
            exclusions: Vec::new(),
            max_overlap,
        })
    }

    pub fn program(&self) -> &BinaryProgram {
        &self.program
    }

    pub fn variable_count(&self) -> usize {
        self.players.len()
    }

    /// Player sets excluded so far, in discovery order.
    pub fn exclusions(&self) -> &[BTreeSet<PlayerId>] {
        &self.exclusions
    }

    pub fn max_overlap(&self) -> u32 {
        self.max_overlap
    }

    /// Forbids any later lineup from sharing more than `max_overlap` players
    /// with `lineup`.
    pub fn exclude(&mut self, lineup: &Lineup) -> Result<()> {
        let set = lineup.to_set();
        let expr = LinearExpr::sum(set.iter().filter_map(|id| self.vars.get(id).copied()));
        let name = format!("exclude_{}", self.exclusions.len() + 1);
        self.program
            .add_constraint(
                name,
                expr,
                ConstraintSense::LessOrEqual,
                f64::from(self.max_overlap),
            )
            .map_err(model_error)?;
        self.exclusions.push(set);
        Ok(())
    }

    /// Players selected by `solution`, in pool order.
    pub fn lineup(&self, solution: &BinarySolution) -> Lineup {
        Lineup::new(solution.selected().map(|i| self.players[i].as_str()))
    }

    /// Every model constraint evaluated at `solution`.
    pub fn evaluate(&self, solution: &BinarySolution) -> Vec<ConstraintEvaluation> {
        self.program
            .constraints()
            .iter()
            .map(|c| ConstraintEvaluation {
                name: c.name().to_string(),
                lhs: c.expr().evaluate(solution.values()),
                sense: c.sense(),
                rhs: c.rhs(),
                binding: c.is_binding(solution.values()),
            })
            .collect()
    }

    /// Returns true if `player` has a decision variable.
    pub fn is_eligible(&self, player: &Player) -> bool {
        self.vars.contains_key(player.id())
    }
}

fn model_error(err: ModelError) -> DraftForgeError {
    DraftForgeError::Model(err.to_string())
}
