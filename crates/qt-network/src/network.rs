//! Water network snapshot and builder.
//!
//! # Data layout
//!
//! Nodes and pipes are stored in `Vec` arenas indexed by [`NodeId`] and
//! [`PipeId`].  Pipe slots are `Option<Pipe>`: removing a pipe leaves a
//! tombstone so every id stays stable across the snapshots derived from one
//! base network.
//!
//! ```text
//! base ──clone + assess──▶ damaged ──drop failed + add reroutes──▶ operational
//! ```
//!
//! The graph is undirected.  `adjacency[n]` lists the ids of every live pipe
//! touching node `n`, in insertion order.
//!
//! # Pipe status
//!
//! Status is never stored.  [`WaterNetwork::pipe_status`] derives it from
//! the pipe's failure probability and the snapshot's failure threshold, so a
//! snapshot can never hold a status that disagrees with its probabilities.

use rustc_hash::FxHashMap;

use qt_core::{CRITICAL_PRIORITY, GeoPoint, Material, NodeId, PipeId, PipeStatus, SoilType};

use crate::reach::Reachability;
use crate::{NetworkError, NetworkResult};

// ── Node ──────────────────────────────────────────────────────────────────────

/// A junction, supply point, or consumer.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Unique external identifier (e.g. `"N4"`).
    pub name:     String,
    pub pos:      GeoPoint,
    /// Non-negative water demand.
    pub demand:   f64,
    /// Service priority, 1 (lowest) to 5 (highest).
    pub priority: u8,
    /// Free-form classification (`"critical"`, `"residential"`, …).
    pub kind:     String,
}

impl Node {
    pub fn new(name: impl Into<String>, pos: GeoPoint, demand: f64, priority: u8) -> Self {
        Self { name: name.into(), pos, demand, priority, kind: String::new() }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// `priority >= 4`.
    #[inline]
    pub fn is_critical(&self) -> bool {
        self.priority >= CRITICAL_PRIORITY
    }
}

// ── Pipe ──────────────────────────────────────────────────────────────────────

/// Seismic assessment stamped on a pipe by the damage phase.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Assessment {
    pub stress:       f64,
    pub failure_prob: f64,
}

/// An undirected pipe between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Pipe {
    /// Unique external identifier (e.g. `"P7"`).
    pub name:         String,
    pub from:         NodeId,
    pub to:           NodeId,
    /// Length in metres.  Always positive.
    pub length_m:     f64,
    pub material:     Material,
    pub age_years:    f64,
    pub soil:         SoilType,
    pub pressure_cap: f64,
    /// `false` for synthetic reroute pipes.
    pub is_physical:  bool,
    /// Optional routing risk factor; absent means 0.
    pub risk:         Option<f64>,
    /// `None` until the damage phase scores the pipe.
    pub assessment:   Option<Assessment>,
}

impl Pipe {
    /// A physical pipe with zero age and a nominal 100-unit pressure capacity.
    pub fn new(
        name:     impl Into<String>,
        from:     NodeId,
        to:       NodeId,
        length_m: f64,
        material: Material,
        soil:     SoilType,
    ) -> Self {
        Self {
            name: name.into(),
            from,
            to,
            length_m,
            material,
            age_years:    0.0,
            soil,
            pressure_cap: 100.0,
            is_physical:  true,
            risk:         None,
            assessment:   None,
        }
    }

    pub fn with_age(mut self, years: f64) -> Self {
        self.age_years = years;
        self
    }

    pub fn with_pressure_cap(mut self, cap: f64) -> Self {
        self.pressure_cap = cap;
        self
    }

    pub fn with_risk(mut self, risk: f64) -> Self {
        self.risk = Some(risk);
        self
    }

    /// The endpoint opposite `node`.
    #[inline]
    pub fn other_end(&self, node: NodeId) -> NodeId {
        if self.from == node { self.to } else { self.from }
    }

    #[inline]
    pub fn failure_prob(&self) -> Option<f64> {
        self.assessment.map(|a| a.failure_prob)
    }
}

// ── WaterNetwork ──────────────────────────────────────────────────────────────

/// One snapshot of the water network.
///
/// `Clone` produces an independent snapshot; nothing is shared between
/// copies.  Construct with [`WaterNetworkBuilder`].
#[derive(Clone, Debug)]
pub struct WaterNetwork {
    nodes:             Vec<Node>,
    pipes:             Vec<Option<Pipe>>,
    adjacency:         Vec<Vec<PipeId>>,
    by_name:           FxHashMap<String, NodeId>,
    source:            NodeId,
    failure_threshold: Option<f64>,
}

impl WaterNetwork {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of live (non-removed) pipes.
    pub fn pipe_count(&self) -> usize {
        self.pipes.iter().filter(|p| p.is_some()).count()
    }

    // ── Nodes ─────────────────────────────────────────────────────────────

    /// The distinguished supply node all reachability is measured from.
    #[inline]
    pub fn source(&self) -> NodeId {
        self.source
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Nodes with priority ≥ 4, in id order.  Recomputed on every call.
    pub fn critical_nodes(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|(_, n)| n.is_critical())
            .map(|(id, _)| id)
            .collect()
    }

    // ── Pipes ─────────────────────────────────────────────────────────────

    /// `None` for an unknown id or a removed pipe.
    pub fn pipe(&self, id: PipeId) -> Option<&Pipe> {
        self.pipes.get(id.index()).and_then(Option::as_ref)
    }

    /// Live pipes in id order.
    pub fn pipes(&self) -> impl Iterator<Item = (PipeId, &Pipe)> + '_ {
        self.pipes
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_ref().map(|p| (PipeId(i as u32), p)))
    }

    /// Live pipes touching `node`, paired with the node at the other end.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (PipeId, &Pipe, NodeId)> + '_ {
        self.adjacency[node.index()].iter().filter_map(move |&pid| {
            self.pipe(pid).map(|p| (pid, p, p.other_end(node)))
        })
    }

    /// Stamp a damage assessment on a pipe.  Returns `false` if the pipe does
    /// not exist or is synthetic (synthetic pipes are never re-evaluated).
    pub fn set_assessment(&mut self, id: PipeId, assessment: Assessment) -> bool {
        match self.pipes.get_mut(id.index()).and_then(Option::as_mut) {
            Some(p) if p.is_physical => {
                p.assessment = Some(assessment);
                true
            }
            _ => false,
        }
    }

    // ── Status ────────────────────────────────────────────────────────────

    /// The failure threshold in force for this snapshot, if the damage phase
    /// has run.
    pub fn failure_threshold(&self) -> Option<f64> {
        self.failure_threshold
    }

    pub fn set_failure_threshold(&mut self, threshold: f64) {
        self.failure_threshold = Some(threshold);
    }

    /// Derived status of a live pipe.
    pub fn pipe_status(&self, id: PipeId) -> Option<PipeStatus> {
        self.pipe(id).map(|p| self.status_of(p))
    }

    /// Derived status of `pipe` under this snapshot's threshold.
    pub fn status_of(&self, pipe: &Pipe) -> PipeStatus {
        if !pipe.is_physical {
            return PipeStatus::Rerouted;
        }
        match (pipe.failure_prob(), self.failure_threshold) {
            (Some(p), Some(t)) if p > t => PipeStatus::Failed,
            _ => PipeStatus::Healthy,
        }
    }

    /// Ids of all pipes whose derived status is `Failed`.
    pub fn failed_pipes(&self) -> Vec<PipeId> {
        self.pipes()
            .filter(|(_, p)| self.status_of(p) == PipeStatus::Failed)
            .map(|(id, _)| id)
            .collect()
    }

    // ── Derived snapshots ─────────────────────────────────────────────────

    /// Copy of this snapshot with every failed pipe physically removed.
    ///
    /// Pipe ids of the survivors are unchanged.
    pub fn without_failed(&self) -> WaterNetwork {
        let mut out = self.clone();
        for id in self.failed_pipes() {
            out.remove_pipe(id);
        }
        out
    }

    /// Remove a pipe, leaving a tombstone in its slot.
    pub fn remove_pipe(&mut self, id: PipeId) -> Option<Pipe> {
        let pipe = self.pipes.get_mut(id.index())?.take()?;
        self.adjacency[pipe.from.index()].retain(|&p| p != id);
        self.adjacency[pipe.to.index()].retain(|&p| p != id);
        Some(pipe)
    }

    /// Insert a synthetic, non-physical pipe between `a` and `b`.
    ///
    /// The pipe inherits no material or soil from the ground; those fields
    /// carry placeholders and are never scored.
    pub fn add_synthetic_pipe(
        &mut self,
        a:            NodeId,
        b:            NodeId,
        length_m:     f64,
        failure_prob: f64,
        pressure_cap: f64,
    ) -> PipeId {
        let id = PipeId(self.pipes.len() as u32);
        let name = format!("R-{}-{}", self.nodes[a.index()].name, self.nodes[b.index()].name);
        let pipe = Pipe {
            name,
            from:         a,
            to:           b,
            length_m,
            material:     Material::DuctileIron,
            age_years:    0.0,
            soil:         SoilType::Rock,
            pressure_cap,
            is_physical:  false,
            risk:         None,
            assessment:   Some(Assessment { stress: 0.0, failure_prob }),
        };
        self.pipes.push(Some(pipe));
        self.adjacency[a.index()].push(id);
        self.adjacency[b.index()].push(id);
        id
    }

    // ── Connectivity ──────────────────────────────────────────────────────

    /// Nodes reachable from the source over live pipes.
    pub fn reachable_from_source(&self) -> Reachability {
        Reachability::from(self, self.source)
    }
}

// ── WaterNetworkBuilder ───────────────────────────────────────────────────────

/// Construct a [`WaterNetwork`] incrementally, then call [`build`](Self::build).
///
/// The first node added is the source unless [`set_source`](Self::set_source)
/// names another.
///
/// # Example
///
/// ```
/// use qt_core::{GeoPoint, Material, SoilType};
/// use qt_network::{Node, Pipe, WaterNetworkBuilder};
///
/// let mut b = WaterNetworkBuilder::new();
/// let n1 = b.add_node(Node::new("N1", GeoPoint::new(23.26, 77.41), 50.0, 5)).unwrap();
/// let n2 = b.add_node(Node::new("N2", GeoPoint::new(23.27, 77.41), 80.0, 2)).unwrap();
/// b.add_pipe(Pipe::new("P2", n1, n2, 400.0, Material::Pvc, SoilType::Clay)).unwrap();
/// let net = b.build().unwrap();
/// assert_eq!(net.source(), n1);
/// assert_eq!(net.pipe_count(), 1);
/// ```
#[derive(Default)]
pub struct WaterNetworkBuilder {
    nodes:   Vec<Node>,
    pipes:   Vec<Pipe>,
    by_name: FxHashMap<String, NodeId>,
    source:  Option<NodeId>,
}

impl WaterNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its id (sequential from 0).
    pub fn add_node(&mut self, node: Node) -> NetworkResult<NodeId> {
        if self.by_name.contains_key(&node.name) {
            return Err(NetworkError::DuplicateNode(node.name));
        }
        if !(1..=5).contains(&node.priority) {
            return Err(NetworkError::InvalidNode { node: node.name, reason: "priority must be 1-5" });
        }
        if !node.demand.is_finite() || node.demand < 0.0 {
            return Err(NetworkError::InvalidNode { node: node.name, reason: "demand must be finite and >= 0" });
        }
        let id = NodeId(self.nodes.len() as u32);
        self.by_name.insert(node.name.clone(), id);
        self.nodes.push(node);
        Ok(id)
    }

    /// Add an undirected pipe between two nodes added earlier.
    pub fn add_pipe(&mut self, pipe: Pipe) -> NetworkResult<PipeId> {
        let n = self.nodes.len();
        if pipe.from.index() >= n || pipe.to.index() >= n {
            return Err(NetworkError::InvalidPipe { pipe: pipe.name, reason: "endpoint not in network" });
        }
        if pipe.from == pipe.to {
            return Err(NetworkError::InvalidPipe { pipe: pipe.name, reason: "endpoints must differ" });
        }
        if !pipe.length_m.is_finite() || pipe.length_m <= 0.0 {
            return Err(NetworkError::InvalidPipe { pipe: pipe.name, reason: "length must be positive" });
        }
        if !pipe.pressure_cap.is_finite() || pipe.age_years < 0.0 {
            return Err(NetworkError::InvalidPipe { pipe: pipe.name, reason: "age and pressure capacity must be valid" });
        }
        let id = PipeId(self.pipes.len() as u32);
        self.pipes.push(pipe);
        Ok(id)
    }

    pub fn set_source(&mut self, id: NodeId) {
        self.source = Some(id);
    }

    /// Look up a node added earlier by name.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn pipe_count(&self) -> usize { self.pipes.len() }

    /// Consume the builder and produce a [`WaterNetwork`].
    pub fn build(self) -> NetworkResult<WaterNetwork> {
        if self.nodes.is_empty() {
            return Err(NetworkError::Empty);
        }
        let source = self.source.unwrap_or(NodeId(0));
        if source.index() >= self.nodes.len() {
            return Err(NetworkError::UnknownNode(source.to_string()));
        }

        let mut adjacency = vec![Vec::new(); self.nodes.len()];
        for (i, p) in self.pipes.iter().enumerate() {
            adjacency[p.from.index()].push(PipeId(i as u32));
            adjacency[p.to.index()].push(PipeId(i as u32));
        }

        Ok(WaterNetwork {
            nodes: self.nodes,
            pipes: self.pipes.into_iter().map(Some).collect(),
            adjacency,
            by_name: self.by_name,
            source,
            failure_threshold: None,
        })
    }
}
