use crate::treeplex::{
    AuxState, ConstraintAccumulator, ConstraintKey, FlowMap, SequenceId, SequenceRegistry,
    SequenceStep,
};
use efg_tree::game::{History, HistoryType, Infoset, Player};
use log::{debug, trace};

/// Everything the sequence-form LP of one player needs, as collected by
/// `SequenceFormBuilder` in a single pass over the game tree.
#[derive(Debug, Clone)]
pub struct SequenceFormProgram {
    player: Player,
    registry: SequenceRegistry,
    flows: FlowMap,
    constraints: ConstraintAccumulator,
    num_leaves: usize,
}

impl SequenceFormProgram {
    /// The player whose realization plan the program optimizes over.
    pub fn player(&self) -> Player {
        self.player
    }

    pub fn registry(&self) -> &SequenceRegistry {
        &self.registry
    }

    pub fn flows(&self) -> &FlowMap {
        &self.flows
    }

    pub fn constraints(&self) -> &ConstraintAccumulator {
        &self.constraints
    }

    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    pub fn empty_sequence_id(&self) -> SequenceId {
        self.registry.empty_sequence_id(self.player)
    }

    /// Sequences of the solving player, each of which gets a
    /// realization-plan variable.
    pub fn sequences(&self) -> impl Iterator<Item = SequenceId> + '_ {
        self.registry.sequences_of(self.player)
    }
}

/// A sequence extension which is applied when its child vertex is popped from
/// the stack, so that ids are handed out in the same order as a recursive
/// pre-order walk would.
#[derive(Debug, Clone, Copy)]
struct PendingStep {
    player: Player,
    step: SequenceStep,
}

/// Builder for the sequence-form program of one player. The builder walks a
/// game tree once, registering both players' sequences, recording the
/// realization-plan structure of the solving player and accumulating the
/// payoff-bounding constraints of the opponent's information sets.
pub struct SequenceFormBuilder {
    player: Player,
    registry: SequenceRegistry,
    flows: FlowMap,
    constraints: ConstraintAccumulator,
    num_leaves: usize,
}

impl SequenceFormBuilder {
    /// Initializes a builder for the program solved by `player`. Both empty
    /// sequences and the root constraint exist from the start.
    pub fn new(player: Player) -> SequenceFormBuilder {
        SequenceFormBuilder {
            player,
            registry: SequenceRegistry::new(),
            flows: FlowMap::new(),
            constraints: ConstraintAccumulator::new(),
            num_leaves: 0,
        }
    }

    /// Traverses the tree rooted at `root` and returns the resulting program.
    /// This is the primary function of the builder.
    pub fn make_program<T: History>(mut self, root: &T) -> SequenceFormProgram {
        self.traverse_tree(root);

        debug!(
            "Sequence form for {}: {} sequences ({} own), {} flow constraints, {} value constraints, {} leaves",
            self.player,
            self.registry.num_sequences(),
            self.registry.sequences_of(self.player).count(),
            self.flows.len(),
            self.constraints.len(),
            self.num_leaves
        );

        SequenceFormProgram {
            player: self.player,
            registry: self.registry,
            flows: self.flows,
            constraints: self.constraints,
            num_leaves: self.num_leaves,
        }
    }

    /// Walks the tree depth first using an explicit stack, in pre-order and
    /// with children visited in the order of `History::actions()`.
    fn traverse_tree<T: History>(&mut self, root: &T) {
        let initial_aux_state = AuxState::new(
            self.registry.empty_sequence_id(Player::Player1),
            self.registry.empty_sequence_id(Player::Player2),
        );

        let mut vertex_stack = Vec::<(T, AuxState, Option<PendingStep>)>::new();
        vertex_stack.push((root.clone(), initial_aux_state, None));

        while let Some((history, aux_state, pending)) = vertex_stack.pop() {
            let aux_state = match pending {
                Some(pending) => self.enter_sequence(pending, aux_state),
                None => aux_state,
            };
            match history.history_type() {
                HistoryType::Terminal => self.handle_leaf(&history, aux_state),
                HistoryType::Chance => Self::handle_chance(&history, aux_state, &mut vertex_stack),
                HistoryType::Decision => self.handle_player(&history, aux_state, &mut vertex_stack),
            }
        }
    }

    /// Extends the acting player's sequence. A solving-player sequence seen
    /// for the first time becomes a child in the flow map.
    fn enter_sequence(&mut self, pending: PendingStep, aux_state: AuxState) -> AuxState {
        let parent = aux_state.prev_seq(pending.player);
        let (sequence, is_new) = self.registry.extend(parent, pending.step);
        if is_new {
            trace!(
                "Registered sequence {} = {} for {}",
                sequence,
                self.registry.sequence(sequence),
                pending.player
            );
            if pending.player == self.player {
                self.flows.record(parent, pending.step.infoset, sequence);
            }
        }
        aux_state.new_with_updated_sequence(pending.player, sequence)
    }

    /// Constraint that the current state contributes to, determined by the
    /// opponent's last move.
    fn constraint_key(&self, aux_state: &AuxState) -> ConstraintKey {
        let opponent_sequence = aux_state.prev_seq(self.player.opponent());
        ConstraintKey::from_last_step(self.registry.last_step(opponent_sequence))
    }

    fn handle_leaf<T: History>(&mut self, history: &T, aux_state: AuxState) {
        let key = self.constraint_key(&aux_state);
        self.constraints.push_payoff(
            key,
            aux_state.prev_seq(self.player),
            aux_state.chance_factor,
            history.utility(),
        );
        self.num_leaves += 1;
    }

    /// Expands a chance vertex; only the chance factor changes on the way down.
    fn handle_chance<T: History>(
        history: &T,
        aux_state: AuxState,
        vertex_stack: &mut Vec<(T, AuxState, Option<PendingStep>)>,
    ) {
        let actions = history.actions();
        debug_assert!(
            (actions.iter().map(|a| history.chance_prob(a)).sum::<f64>() - 1.0).abs() < 1e-9,
            "Chance probabilities at {:?} do not sum to one",
            history
        );

        for action in actions.iter().rev() {
            let prob = history.chance_prob(action);
            debug_assert!(prob >= 0f64);
            vertex_stack.push((
                history.child(action),
                aux_state.new_with_updated_chance(prob),
                None,
            ));
        }
    }

    /// Expands a decision vertex. If the opponent is acting, its information
    /// set is wired into the constraint of the opponent's previous move.
    fn handle_player<T: History>(
        &mut self,
        history: &T,
        aux_state: AuxState,
        vertex_stack: &mut Vec<(T, AuxState, Option<PendingStep>)>,
    ) {
        let player = history.current_player();
        let infoset = history.infoset().index();
        let actions = history.actions();
        if actions.is_empty() {
            // An opponent infoset without actions has an unconstrained value;
            // the LP backend reports it as unbounded.
            debug!("Decision vertex {:?} has no actions", history);
        }

        if player != self.player {
            let key = self.constraint_key(&aux_state);
            if self
                .constraints
                .push_nested(key, aux_state.chance_factor, infoset)
            {
                trace!("Infoset {} nested under constraint {}", infoset, key);
            }
        }

        for (action_index, action) in actions.iter().enumerate().rev() {
            let pending = PendingStep {
                player,
                step: SequenceStep::new(infoset, action_index),
            };
            vertex_stack.push((history.child(action), aux_state, Some(pending)));
        }
    }
}
