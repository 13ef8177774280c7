//! Contact points and their owner.

use std::collections::BTreeMap;

use dental_collision::{Collidable, PosedTooth, separation_distance};
use dental_types::{
    ARCH_SEQUENCE, Point3, ToothId, ToothMesh, ToothNode, ToothState, Vector3, VectorExt,
};
use tracing::{debug, info};

use crate::estimate::sample_contact_area;
use crate::validation::{ContactValidationResult, validate_contact};
use crate::{ContactParams, ContactResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a contact was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ContactOrigin {
    /// Placed by proximity detection.
    Automatic,
    /// Placed by the user.
    #[default]
    Manual,
}

/// A contact between two neighbouring teeth.
///
/// Area and force are stored as given; out-of-range values are reported by
/// validation, never clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactPoint {
    /// Identifier assigned by the [`ContactManager`].
    pub id: usize,
    /// World-space contact position.
    pub position: Point3<f64>,
    /// Unit normal pointing from `first` towards `second`.
    pub normal: Vector3<f64>,
    /// Contact area (mm²).
    pub area: f64,
    /// Applied force (N).
    pub force: f64,
    /// First tooth.
    pub first: ToothId,
    /// Second tooth.
    pub second: ToothId,
    /// How the contact was created.
    pub origin: ContactOrigin,
}

impl ContactPoint {
    /// A manual contact with zero area and force. The normal is normalized.
    #[must_use]
    pub fn new(first: ToothId, second: ToothId, position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            id: 0,
            position,
            normal: normal.normalize_or_zero(),
            area: 0.0,
            force: 0.0,
            first,
            second,
            origin: ContactOrigin::Manual,
        }
    }

    /// Set the area.
    #[must_use]
    pub const fn with_area(mut self, area: f64) -> Self {
        self.area = area;
        self
    }

    /// Set the force.
    #[must_use]
    pub const fn with_force(mut self, force: f64) -> Self {
        self.force = force;
        self
    }

    /// True if the contact touches `tooth`.
    #[must_use]
    pub fn involves(&self, tooth: ToothId) -> bool {
        self.first == tooth || self.second == tooth
    }
}

/// Owns the contact points of an arch.
///
/// # Example
///
/// ```
/// use dental_contact::{ContactManager, ContactPoint};
/// use dental_types::{ToothId, Point3, Vector3};
///
/// let right: ToothId = "central_R".parse().unwrap();
/// let left = right.counterpart();
///
/// let mut manager = ContactManager::default();
/// let id = manager.add_manual(ContactPoint::new(right, left, Point3::origin(), Vector3::x()));
///
/// assert_eq!(manager.contacts_for(left).count(), 1);
/// assert!(manager.remove(id).is_some());
/// assert!(manager.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContactManager {
    params: ContactParams,
    contacts: Vec<ContactPoint>,
    next_id: usize,
}

impl ContactManager {
    /// Creates an empty manager.
    ///
    /// The thresholds are taken as given; use [`ContactManager::try_new`]
    /// to check them first.
    #[must_use]
    pub const fn new(params: ContactParams) -> Self {
        Self {
            params,
            contacts: Vec::new(),
            next_id: 0,
        }
    }

    /// Creates an empty manager, rejecting invalid thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::InvalidParameter`](crate::ContactError::InvalidParameter)
    /// if [`ContactParams::validate`] fails.
    pub fn try_new(params: ContactParams) -> ContactResult<Self> {
        params.validate()?;
        Ok(Self::new(params))
    }

    /// The thresholds in use.
    #[must_use]
    pub const fn params(&self) -> &ContactParams {
        &self.params
    }

    fn push(&mut self, mut contact: ContactPoint, origin: ContactOrigin) -> usize {
        contact.id = self.next_id;
        contact.origin = origin;
        self.next_id += 1;
        self.contacts.push(contact);
        contact.id
    }

    /// Adds a user-placed contact; returns its id.
    pub fn add_manual(&mut self, contact: ContactPoint) -> usize {
        self.push(contact, ContactOrigin::Manual)
    }

    /// Replaces automatic contacts by scanning neighbouring teeth.
    ///
    /// Consecutive teeth of [`ARCH_SEQUENCE`] whose boxes are within
    /// `detection_distance` get a contact midway across the gap, with the
    /// area estimated from their world surfaces. Manual contacts are kept.
    /// Returns the number of contacts created.
    pub fn detect(
        &mut self,
        teeth: &BTreeMap<ToothId, ToothNode>,
        states: &BTreeMap<ToothId, ToothState>,
    ) -> usize {
        self.contacts.retain(|c| c.origin == ContactOrigin::Manual);

        let mut created = 0;
        for pair in ARCH_SEQUENCE.windows(2) {
            let (first, second) = (pair[0], pair[1]);
            let (Some(node_a), Some(node_b)) = (teeth.get(&first), teeth.get(&second)) else {
                debug!("Skipping contact detection for {first}-{second}: tooth missing");
                continue;
            };
            let posed_a = PosedTooth::new(node_a, states.get(&first));
            let posed_b = PosedTooth::new(node_b, states.get(&second));
            let (obb_a, obb_b) = (posed_a.world_obb(), posed_b.world_obb());

            let gap = separation_distance(&obb_a, &obb_b);
            if gap > self.params.detection_distance {
                continue;
            }

            let normal = (obb_b.center - obb_a.center).normalize_or_zero();
            let position = obb_a.center + normal * (obb_a.projected_radius(&normal) + gap / 2.0);
            let surface_a = world_surface(node_a, states.get(&first));
            let surface_b = world_surface(node_b, states.get(&second));
            let estimate = sample_contact_area(&position, &surface_a, &surface_b, &self.params);

            let contact = ContactPoint::new(first, second, position, normal).with_area(estimate.area);
            self.push(contact, ContactOrigin::Automatic);
            created += 1;
        }

        info!(created, total = self.contacts.len(), "Contact detection complete");
        created
    }

    /// Removes a contact by id.
    pub fn remove(&mut self, id: usize) -> Option<ContactPoint> {
        let pos = self.contacts.iter().position(|c| c.id == id)?;
        Some(self.contacts.remove(pos))
    }

    /// Removes every contact.
    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    /// All contacts in creation order.
    #[must_use]
    pub fn contacts(&self) -> &[ContactPoint] {
        &self.contacts
    }

    /// Contacts touching `tooth`.
    pub fn contacts_for(&self, tooth: ToothId) -> impl Iterator<Item = &ContactPoint> {
        self.contacts.iter().filter(move |c| c.involves(tooth))
    }

    /// Number of contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// True when there are no contacts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Validates every contact against the current tooth surfaces.
    ///
    /// A tooth missing from `teeth` or without a mesh contributes no samples.
    #[must_use]
    pub fn validate_all(
        &self,
        teeth: &BTreeMap<ToothId, ToothNode>,
        states: &BTreeMap<ToothId, ToothState>,
    ) -> Vec<(usize, ContactValidationResult)> {
        let surface = |id: ToothId| {
            teeth
                .get(&id)
                .map(|node| world_surface(node, states.get(&id)))
                .unwrap_or_default()
        };

        let results: Vec<_> = self
            .contacts
            .iter()
            .map(|c| {
                let result = validate_contact(c, &surface(c.first), &surface(c.second), &self.params);
                (c.id, result)
            })
            .collect();

        let failed = results.iter().filter(|(_, r)| !r.passed).count();
        debug!(contacts = results.len(), failed, "Contact validation complete");
        results
    }
}

fn world_surface(node: &ToothNode, state: Option<&ToothState>) -> ToothMesh {
    node.world_surface(state).unwrap_or_default()
}
