//! Levels: per-kind population quotas and a score target
//!
//! A level is ACTIVE until its score reaches the target; the world then
//! resets it and moves on to the next one (cyclically).

use serde::{Deserialize, Serialize};

use super::state::FishKind;

/// Quota for one fish kind within a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationNode {
    pub kind: FishKind,
    /// Target population
    pub population: u32,
    /// Live fish of this kind credited to the level
    pub current: u32,
}

impl PopulationNode {
    pub fn new(kind: FishKind, population: u32) -> Self {
        Self {
            kind,
            population,
            current: 0,
        }
    }

    /// Fish missing from the quota
    pub fn deficit(&self) -> u32 {
        self.population.saturating_sub(self.current)
    }
}

/// One level of the cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AquariumLevel {
    number: u32,
    score: i32,
    target_score: i32,
    population: Vec<PopulationNode>,
}

impl AquariumLevel {
    pub fn new(number: u32, target_score: i32) -> Self {
        Self {
            number,
            score: 0,
            target_score,
            population: Vec::new(),
        }
    }

    /// Append a quota node (declaration order is spawn order)
    pub fn with_node(mut self, kind: FishKind, population: u32) -> Self {
        self.population.push(PopulationNode::new(kind, population));
        self
    }

    /// The stock levels 0..=4, returns `None` past the last preset
    pub fn preset(number: u32) -> Option<Self> {
        use FishKind::*;
        let level = match number {
            0 => Self::new(0, 10).with_node(Common, 10),
            1 => Self::new(1, 15).with_node(Common, 20),
            2 => Self::new(2, 20).with_node(Common, 30).with_node(Bigger, 5),
            3 => Self::new(3, 25)
                .with_node(Common, 25)
                .with_node(Bigger, 10)
                .with_node(Fast, 5),
            4 => Self::new(4, 30)
                .with_node(Common, 30)
                .with_node(Bigger, 15)
                .with_node(Fast, 10)
                .with_node(Armored, 5),
            _ => return None,
        };
        Some(level)
    }

    /// All stock levels in order
    pub fn presets() -> Vec<Self> {
        (0..).map_while(Self::preset).collect()
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn target_score(&self) -> i32 {
        self.target_score
    }

    pub fn population(&self) -> &[PopulationNode] {
        &self.population
    }

    pub fn is_completed(&self) -> bool {
        self.score >= self.target_score
    }

    /// Credit a removed fish: one fewer of its kind, `power` more score.
    /// Kinds without a quota node are ignored.
    pub fn consume_population(&mut self, kind: FishKind, power: i32) {
        if let Some(node) = self.population.iter_mut().find(|n| n.kind == kind) {
            node.current = node.current.saturating_sub(1);
            self.score += power;
        }
    }

    /// Zero every node's live count; targets are untouched
    pub fn population_reset(&mut self) {
        for node in &mut self.population {
            node.current = 0;
        }
    }

    /// Zero the score and the live counts
    pub fn level_reset(&mut self) {
        self.score = 0;
        self.population_reset();
    }

    /// Kinds to spawn to fill every quota, node by node, and mark the
    /// quotas as filled
    pub fn repopulate(&mut self) -> Vec<FishKind> {
        let mut spawns = Vec::new();
        for node in &mut self.population {
            let need = node.deficit();
            if need > 0 {
                spawns.extend(std::iter::repeat_n(node.kind, need as usize));
                node.current += need;
            }
        }
        spawns
    }
}
