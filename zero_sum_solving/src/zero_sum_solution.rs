use crate::error::Error;
use approx::abs_diff_eq;
use efg_tree::game::{InfosetId, Player};
use libgt::{FlowMap, SequenceId, SequenceRegistry};
use std::collections::BTreeMap;

/// Probability mass below which a sequence is treated as unreachable when
/// converting to a behavioral strategy.
const REACH_THRESHOLD: f64 = 1e-12;

/// Realization plan of the solving player, indexed by sequence id.
#[derive(Debug, Clone, PartialEq)]
pub struct RealizationPlan {
    player: Player,
    empty_sequence: SequenceId,
    probabilities: BTreeMap<SequenceId, f64>,
}

impl RealizationPlan {
    pub fn new(
        player: Player,
        empty_sequence: SequenceId,
        probabilities: BTreeMap<SequenceId, f64>,
    ) -> RealizationPlan {
        RealizationPlan {
            player,
            empty_sequence,
            probabilities,
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn empty_sequence_id(&self) -> SequenceId {
        self.empty_sequence
    }

    /// Returns `None` for sequences that do not belong to the solving player.
    pub fn probability(&self, sequence: SequenceId) -> Option<f64> {
        self.probabilities.get(&sequence).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SequenceId, f64)> + '_ {
        self.probabilities.iter().map(|(&id, &p)| (id, p))
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Checks that the plan puts unit mass on the empty sequence and that
    /// every infoset passes its parent's mass on to its children.
    pub fn validate(&self, flows: &FlowMap, tolerance: f64) -> Result<(), Error> {
        let root_mass = self.mass(self.empty_sequence);
        if !abs_diff_eq!(root_mass, 1f64, epsilon = tolerance) {
            return Err(Error::FlowViolation {
                parent: self.empty_sequence,
                infoset: None,
                expected: 1f64,
                actual: root_mass,
            });
        }

        for (parent, infoset, children) in flows.iter() {
            let parent_mass = self.mass(parent);
            let children_mass: f64 = children.iter().map(|&child| self.mass(child)).sum();
            let negative_child = children.iter().any(|&child| self.mass(child) < -tolerance);
            if negative_child || !abs_diff_eq!(parent_mass, children_mass, epsilon = tolerance) {
                return Err(Error::FlowViolation {
                    parent,
                    infoset: Some(infoset),
                    expected: parent_mass,
                    actual: children_mass,
                });
            }
        }

        Ok(())
    }

    /// Converts the plan into action probabilities per information set.
    /// Entries are indexed by action index; infosets the plan never reaches
    /// are played uniformly.
    pub fn behavioral(
        &self,
        flows: &FlowMap,
        registry: &SequenceRegistry,
    ) -> BTreeMap<InfosetId, Vec<f64>> {
        let mut strategy = BTreeMap::new();
        for (parent, infoset, children) in flows.iter() {
            let actions: Vec<usize> = children
                .iter()
                .map(|&child| registry.last_step(child).map_or(0, |step| step.action))
                .collect();
            let num_actions = actions.iter().max().map_or(0, |&a| a + 1);
            let mut probabilities = vec![0f64; num_actions];

            let parent_mass = self.mass(parent);
            for (&child, &action) in children.iter().zip(actions.iter()) {
                probabilities[action] = if parent_mass > REACH_THRESHOLD {
                    self.mass(child).max(0f64) / parent_mass
                } else {
                    1f64 / children.len() as f64
                };
            }
            strategy.insert(infoset, probabilities);
        }
        strategy
    }

    fn mass(&self, sequence: SequenceId) -> f64 {
        self.probabilities.get(&sequence).cloned().unwrap_or(0f64)
    }
}

/// Result of solving the sequence-form LP for one player.
#[derive(Debug, Clone)]
pub struct ZeroSumSolution {
    pub player: Player,
    /// Expected payoff of `player` under equilibrium play.
    pub game_value: f64,
    pub realization_plan: RealizationPlan,
}

impl ZeroSumSolution {
    pub fn new(
        player: Player,
        game_value: f64,
        realization_plan: RealizationPlan,
    ) -> ZeroSumSolution {
        ZeroSumSolution {
            player,
            game_value,
            realization_plan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use libgt::SequenceStep;

    // Player1 root 0, one infoset (7) with actions 0 and 1 and a second
    // infoset (9) below action 1 that the plan never reaches.
    fn two_level_plan(probabilities: &[(SequenceId, f64)]) -> (FlowMap, SequenceRegistry, RealizationPlan) {
        let mut registry = SequenceRegistry::new();
        let mut flows = FlowMap::new();
        let root = registry.empty_sequence_id(Player::Player1);
        let (left, _) = registry.extend(root, SequenceStep::new(7, 0));
        let (right, _) = registry.extend(root, SequenceStep::new(7, 1));
        let (deep_left, _) = registry.extend(right, SequenceStep::new(9, 0));
        let (deep_right, _) = registry.extend(right, SequenceStep::new(9, 1));
        flows.record(root, 7, left);
        flows.record(root, 7, right);
        flows.record(right, 9, deep_left);
        flows.record(right, 9, deep_right);

        let plan = RealizationPlan::new(
            Player::Player1,
            root,
            probabilities.iter().cloned().collect(),
        );
        (flows, registry, plan)
    }

    #[test]
    fn valid_plan_passes() {
        let (flows, _, plan) = two_level_plan(&[(0, 1.0), (2, 0.25), (3, 0.75), (4, 0.5), (5, 0.25)]);
        assert_eq!(plan.validate(&flows, 1e-9), Ok(()));
        assert_eq!(plan.probability(3), Some(0.75));
        assert_eq!(plan.probability(1), None);
        assert_eq!(plan.len(), 5);
    }

    #[test]
    fn broken_flow_is_reported() {
        let (flows, _, plan) = two_level_plan(&[(0, 1.0), (2, 0.25), (3, 0.75), (4, 0.5), (5, 0.5)]);
        match plan.validate(&flows, 1e-9) {
            Err(Error::FlowViolation {
                parent, infoset, ..
            }) => {
                assert_eq!(parent, 3);
                assert_eq!(infoset, Some(9));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn empty_sequence_mass_is_checked() {
        let (flows, _, plan) = two_level_plan(&[(0, 0.5), (2, 0.5)]);
        match plan.validate(&flows, 1e-9) {
            Err(Error::FlowViolation { infoset: None, .. }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn behavioral_conversion() {
        let (flows, registry, plan) = two_level_plan(&[(0, 1.0), (2, 1.0), (3, 0.0), (4, 0.0), (5, 0.0)]);
        let strategy = plan.behavioral(&flows, &registry);
        assert_eq!(strategy.len(), 2);
        assert_approx_eq!(strategy[&7][0], 1.0);
        assert_approx_eq!(strategy[&7][1], 0.0);
        // Unreachable infoset is played uniformly.
        assert_approx_eq!(strategy[&9][0], 0.5);
        assert_approx_eq!(strategy[&9][1], 0.5);
    }
}
