//! Serial kinematic chains: ordered links between a base and a tool frame.

use linkdyn_math::{Pose, SpatialVec};

use crate::{DhParameters, DhTable, LinkModel, ModelError, Result};

/// An immutable open chain of links.
///
/// Index 0 is the base-adjacent link and index `N-1` the tool-adjacent one.
/// Every per-configuration quantity is computed fresh from `q`.
#[derive(Debug, Clone, PartialEq)]
pub struct SerialChain {
    links: Vec<LinkModel>,
    base: Pose,
    tool: Pose,
}

impl SerialChain {
    /// Create a chain from links plus base (world → joint 1) and tool (link N → end effector) poses.
    pub fn new(links: Vec<LinkModel>, base: Pose, tool: Pose) -> Self {
        Self { links, base, tool }
    }

    /// Number of moving links.
    pub fn num_links(&self) -> usize {
        self.links.len()
    }

    pub fn links(&self) -> &[LinkModel] {
        &self.links
    }

    /// Link `i`, zero-based from the base.
    pub fn link(&self, i: usize) -> Option<&LinkModel> {
        self.links.get(i)
    }

    /// Base pose in the world frame.
    pub fn base(&self) -> &Pose {
        &self.base
    }

    /// Tool pose in the link-N frame.
    pub fn tool(&self) -> &Pose {
        &self.tool
    }

    /// Screw axes of all joints, each in its link's center-of-mass frame.
    pub fn screw_axes(&self) -> Vec<SpatialVec> {
        self.links.iter().map(LinkModel::screw_axis).collect()
    }

    /// Fail with `ShapeMismatch` unless `values` has one entry per link.
    pub fn check_len(&self, what: &'static str, values: &[f64]) -> Result<()> {
        if values.len() == self.links.len() {
            Ok(())
        } else {
            Err(ModelError::ShapeMismatch {
                what,
                expected: self.links.len(),
                actual: values.len(),
            })
        }
    }

    /// Per-link transforms A_j(q_j). `None` means all joints at zero.
    pub fn link_transforms(&self, q: Option<&[f64]>) -> Result<Vec<Pose>> {
        if let Some(q) = q {
            self.check_len("joint positions", q)?;
        }
        Ok(self
            .links
            .iter()
            .enumerate()
            .map(|(i, link)| link.transform(q.map_or(0.0, |q| q[i])))
            .collect())
    }

    /// Forward kinematics: end-effector pose in the world frame.
    pub fn forward_kinematics(&self, q: Option<&[f64]>) -> Result<Pose> {
        let end = self
            .link_transforms(q)?
            .iter()
            .fold(self.base, |t, a| t.compose(a));
        Ok(end.compose(&self.tool))
    }

    /// World pose of each link frame. Frame j sits on the axis of joint j+1.
    pub fn link_frames(&self, q: Option<&[f64]>) -> Result<Vec<Pose>> {
        let mut t = self.base;
        Ok(self
            .link_transforms(q)?
            .iter()
            .map(|a| {
                t = t.compose(a);
                t
            })
            .collect())
    }

    /// World pose of each link's center-of-mass frame.
    pub fn com_frames(&self, q: Option<&[f64]>) -> Result<Vec<Pose>> {
        Ok(self
            .link_frames(q)?
            .iter()
            .zip(&self.links)
            .map(|(frame, link)| frame.compose(&link.com_pose()))
            .collect())
    }

    /// Relative transforms between consecutive center-of-mass frames.
    ///
    /// Returns N+1 poses, entry j being "frame j-1 seen from frame j":
    /// - `[0]`: the base frame expressed in COM frame 1,
    /// - `[j]` for 1 ≤ j < N: COM frame j expressed in COM frame j+1,
    /// - `[N]`: COM frame N expressed in the tool frame.
    ///
    /// Link j (1-based) uses entry j-1 as its `jTi` and entry j as its `kTj`.
    pub fn relative_transforms(&self, q: Option<&[f64]>) -> Result<Vec<Pose>> {
        let coms = self.com_frames(q)?;
        let (Some(first), Some(last)) = (coms.first(), self.links.last()) else {
            return Ok(Vec::new());
        };

        let mut rel = Vec::with_capacity(coms.len() + 1);
        rel.push(first.between(&self.base));
        rel.extend(coms.windows(2).map(|w| w[1].between(&w[0])));
        rel.push(self.tool.between(&last.com_pose()));
        Ok(rel)
    }
}

/// Builder for constructing a `SerialChain`.
#[derive(Debug, Clone, Default)]
pub struct ChainBuilder {
    links: Vec<DhParameters>,
    base: Pose,
    tool: Pose,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a parameter table, rejecting unsupported joint types.
    pub fn from_table(table: &DhTable) -> Result<Self> {
        let mut builder = Self::new().links(table.parameters()?);
        if let Some(base) = &table.base {
            builder = builder.base(base.to_pose());
        }
        if let Some(tool) = &table.tool {
            builder = builder.tool(tool.to_pose());
        }
        Ok(builder)
    }

    /// Set the base pose (world → joint-1 frame).
    pub fn base(mut self, base: Pose) -> Self {
        self.base = base;
        self
    }

    /// Set the tool pose (link-N frame → end effector).
    pub fn tool(mut self, tool: Pose) -> Self {
        self.tool = tool;
        self
    }

    /// Append one link at the tool end.
    pub fn link(mut self, params: DhParameters) -> Self {
        self.links.push(params);
        self
    }

    /// Append several links at the tool end.
    pub fn links(mut self, params: impl IntoIterator<Item = DhParameters>) -> Self {
        self.links.extend(params);
        self
    }

    pub fn build(self) -> SerialChain {
        SerialChain::new(
            self.links.into_iter().map(LinkModel::new).collect(),
            self.base,
            self.tool,
        )
    }
}
