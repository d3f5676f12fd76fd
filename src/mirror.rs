//! Mirror one vertex group through a transient reflected duplicate.
//!
//! The duplicate carries the source group's weights to the other side of the
//! plane; a closest-point transfer then reads them back onto the original
//! object's target group. The duplicate never outlives the transfer.

use crate::blend::{BlendSummary, blend_center_group};
use crate::classify::{GroupClassification, Side};
use crate::config::MirrorSettings;
use crate::errors::MirrorError;
use crate::float_types::Real;
use crate::host::{MirrorHost, ObjectId, TransferOutcome, TransferRequest};
use nalgebra::Matrix4;

/// What happened to one group of a mirror run.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupReport {
    pub source: String,
    pub target: String,
    pub side: Side,
    /// Present for center groups only.
    pub blend: Option<BlendSummary>,
    pub transfer: TransferOutcome,
}

/// Duplicate `object`, reflect the duplicate's world transform by `reflection`,
/// hand it to `body`, then delete it.
///
/// Deletion is attempted on every path, including when `body` fails. A failed
/// deletion is logged and otherwise ignored; `body`'s result is returned.
pub fn with_transient_duplicate<H, T, F>(
    host: &mut H,
    object: ObjectId,
    reflection: &Matrix4<Real>,
    body: F,
) -> Result<T, MirrorError>
where
    H: MirrorHost + ?Sized,
    F: FnOnce(&mut H, ObjectId) -> Result<T, MirrorError>,
{
    let duplicate = host.duplicate_object(object)?;

    let result = host
        .world_transform(duplicate)
        .and_then(|world| host.set_world_transform(duplicate, reflection * world))
        .map_err(MirrorError::from)
        .and_then(|()| body(host, duplicate));

    if let Err(error) = host.delete_object(duplicate) {
        tracing::debug!(%duplicate, %error, "could not delete transient duplicate");
    }

    result
}

/// Mirror the group described by `classification` on `object`.
///
/// Center groups are blended across the seam first and then added back onto
/// themselves; side groups replace their mirror group's weights.
pub fn mirror_group<H: MirrorHost + ?Sized>(
    host: &mut H,
    object: ObjectId,
    classification: &GroupClassification,
    settings: &MirrorSettings,
) -> Result<GroupReport, MirrorError> {
    let blend = if classification.is_center() {
        Some(blend_center_group(
            host,
            object,
            &classification.source,
            &classification.normal,
            settings.center_blend_width,
        )?)
    } else {
        None
    };

    let reflection = classification.plane.reflection();
    let transfer = with_transient_duplicate(host, object, &reflection, |host, duplicate| {
        let request = TransferRequest {
            source: duplicate,
            source_group: classification.source.clone(),
            destination: object,
            destination_group: classification.target.clone(),
            mapping: settings.weight_distribution,
            mix_mode: classification.mix_mode(),
            use_object_transform: true,
            create_if_missing: true,
            max_distance: settings.max_distance,
        };
        Ok(host.transfer_vertex_weights(&request)?)
    })?;

    if transfer.is_partial() {
        tracing::warn!(
            source = %classification.source,
            target = %classification.target,
            missed = transfer.missed,
            "closest-point search found no hit for some vertices; they keep their old membership"
        );
    }
    tracing::debug!(
        source = %classification.source,
        target = %classification.target,
        side = %classification.side,
        written = transfer.written,
        "mirrored vertex group"
    );

    Ok(GroupReport {
        source: classification.source.clone(),
        target: classification.target.clone(),
        side: classification.side,
        blend,
        transfer,
    })
}
