//! Batch driver: pick the groups, run them in order, put the host back.

use crate::classify::{GroupClassification, SidePatterns, classify_group};
use crate::config::{MirrorDirection, MirrorSettings};
use crate::errors::MirrorError;
use crate::host::{EditorArea, HostState, InteractionMode, MirrorHost, ObjectId};
use crate::mirror::{GroupReport, mirror_group};
use std::fmt::Display;

/// Which groups a run mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MirrorScope {
    /// Only the active vertex group.
    ActiveGroup,
    /// Every group on the seeding side (see [`MirrorDirection`]) plus every center group.
    AllGroups,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct MirrorReport {
    pub object: String,
    pub scope: MirrorScope,
    pub groups: Vec<GroupReport>,
    /// Zero-weight memberships removed by the final clean pass.
    pub cleaned_entries: usize,
}

impl Display for MirrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.scope {
            MirrorScope::ActiveGroup => {
                let names: Vec<&str> = self.groups.iter().map(|g| g.source.as_str()).collect();
                write!(f, "Finished mirroring vertex group {} on {}", names.join(", "), self.object)
            },
            MirrorScope::AllGroups => write!(f, "Finished mirroring all vertex groups on {}", self.object),
        }
    }
}

/// Names from `names` a run with `scope` works on, in mesh order.
///
/// `ActiveGroup` yields the active group alone. `AllGroups` yields every name
/// containing the seeding side's pattern or the (non-empty) center pattern;
/// everything else is skipped silently.
///
/// Selection matches the side pattern anywhere in the name, while
/// [`classify_group`] only treats a name *ending* in the right pattern as a
/// right group. Under `NegativeToPositive` a name like `thigh.r.001` is
/// therefore selected and then rejected as unclassified.
pub fn select_groups(
    names: &[String],
    scope: MirrorScope,
    active: Option<&str>,
    patterns: &SidePatterns,
    direction: MirrorDirection,
) -> Vec<String> {
    match scope {
        MirrorScope::ActiveGroup => active.map(|name| vec![name.to_string()]).unwrap_or_default(),
        MirrorScope::AllGroups => {
            let side = match direction {
                MirrorDirection::PositiveToNegative => patterns.left.as_str(),
                MirrorDirection::NegativeToPositive => patterns.right.as_str(),
            };
            names
                .iter()
                .filter(|name| name.contains(side) || patterns.is_center_name(name))
                .cloned()
                .collect()
        },
    }
}

/// Check the operator may run on `object` at all.
pub fn check_preconditions<H: MirrorHost + ?Sized>(
    host: &H,
    object: ObjectId,
    scope: MirrorScope,
) -> Result<(), MirrorError> {
    let name = host.object_name(object)?;
    if !host.is_mesh(object)? {
        return Err(MirrorError::NotAMesh(name));
    }
    if host.vertex_group_names(object)?.is_empty() {
        return Err(MirrorError::NoVertexGroups(name));
    }
    if scope == MirrorScope::ActiveGroup && host.active_group(object)?.is_none() {
        return Err(MirrorError::NoActiveGroup(name));
    }
    Ok(())
}

/// Run `body` with the host in object mode and the 3D viewport current, then
/// restore the snapshot taken on entry, whatever `body` returned.
///
/// A restore failure is reported only when `body` itself succeeded.
pub fn with_object_mode<H, T, F>(host: &mut H, object: ObjectId, body: F) -> Result<T, MirrorError>
where
    H: MirrorHost + ?Sized,
    F: FnOnce(&mut H) -> Result<T, MirrorError>,
{
    let snapshot = host.state();
    let group = host.active_group(object)?;

    host.set_editor(EditorArea::View3D);
    let result = host
        .set_active_object(Some(object))
        .and_then(|()| host.set_mode(InteractionMode::Object))
        .map_err(MirrorError::from)
        .and_then(|()| body(host));

    let restored = restore(host, object, &snapshot, group.as_deref());
    match (result, restored) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(error)) => Err(error),
        (Err(error), restored) => {
            if let Err(restore_error) = restored {
                tracing::warn!(%restore_error, "could not fully restore host state after a failed mirror");
            }
            Err(error)
        },
    }
}

fn restore<H: MirrorHost + ?Sized>(
    host: &mut H,
    object: ObjectId,
    snapshot: &HostState,
    group: Option<&str>,
) -> Result<(), MirrorError> {
    // Mode last: it may depend on the active object being back in place.
    host.set_editor(snapshot.editor);
    if let Some(group) = group {
        host.set_active_group(object, group)?;
    }
    host.set_active_object(snapshot.active_object)?;
    host.set_mode(snapshot.mode)?;
    Ok(())
}

/// Mirror the groups `scope` selects on `object`.
///
/// Settings and every group name are validated before the mesh is touched. The
/// groups then run one at a time; the first failure aborts the rest, leaving
/// already mirrored groups as they are. After a successful run every
/// zero-weight membership on the mesh is removed. Host state is restored on
/// every exit path.
pub fn mirror_vertex_groups<H: MirrorHost + ?Sized>(
    host: &mut H,
    object: ObjectId,
    scope: MirrorScope,
    settings: &MirrorSettings,
) -> Result<MirrorReport, MirrorError> {
    settings.validate()?;
    check_preconditions(host, object, scope)?;

    let patterns = settings.patterns();
    let names = host.vertex_group_names(object)?;
    let active = host.active_group(object)?;
    let worklist = select_groups(
        &names,
        scope,
        active.as_deref(),
        &patterns,
        settings.mirror_direction,
    );
    let classified = worklist
        .iter()
        .map(|name| classify_group(name, &patterns, settings.mirror_plane))
        .collect::<Result<Vec<GroupClassification>, MirrorError>>()?;

    let object_name = host.object_name(object)?;
    tracing::debug!(
        object = %object_name,
        plane = %settings.mirror_plane,
        groups = ?worklist,
        "mirroring vertex groups"
    );

    let (groups, cleaned_entries) = with_object_mode(host, object, |host| {
        let mut groups = Vec::with_capacity(classified.len());
        for classification in &classified {
            groups.push(mirror_group(host, object, classification, settings)?);
        }
        let cleaned = host.clean_zero_weight_entries(object)?;
        Ok((groups, cleaned))
    })?;

    Ok(MirrorReport {
        object: object_name,
        scope,
        groups,
        cleaned_entries,
    })
}
