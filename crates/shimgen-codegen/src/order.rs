//! Emission order of the classes of a module.

use crate::state::GenerationState;
use rustc_hash::FxHashSet;
use shimgen_common::{GenError, Result};
use shimgen_model::Class;

/// The classes of `module`, sorted by name.
///
/// With `template` set in moc mode the classes are additionally reordered so
/// that every class follows its base, since the generated file is compiled
/// top to bottom.
pub fn classes_for_module<'m>(
    state: &GenerationState<'m>,
    module: &str,
    template: bool,
) -> Result<Vec<&'m Class>> {
    let mut classes: Vec<&'m Class> = state
        .model()
        .classes()
        .filter(|class| class.module == module)
        .collect();
    classes.sort_by(|a, b| a.name.cmp(&b.name));

    if template && state.is_moc() {
        classes = sort_topologically(classes)?;
    }

    Ok(classes)
}

/// Reorder `classes` so each class comes after its primary base.
///
/// Bases outside `classes` count as already available. Each pass over the
/// pending list places every class whose base is available, in list order,
/// and a class placed early in a pass unblocks its subclasses later in the
/// same pass. A pass that places nothing means the bases form a cycle.
pub fn sort_topologically(classes: Vec<&Class>) -> Result<Vec<&Class>> {
    let members: FxHashSet<&str> = classes.iter().map(|&class| class.name.as_str()).collect();
    let mut placed: FxHashSet<&str> = FxHashSet::default();
    let mut output = Vec::with_capacity(classes.len());
    let mut pending = classes;

    while !pending.is_empty() {
        let before = pending.len();

        pending.retain(|&class| {
            let ready = match class.primary_base() {
                None => true,
                Some(base) => !members.contains(base) || placed.contains(base),
            };
            if ready {
                placed.insert(class.name.as_str());
                output.push(class);
            }
            !ready
        });

        if pending.len() == before {
            return Err(GenError::CyclicBases {
                classes: pending.iter().map(|class| class.name.clone()).collect(),
            });
        }
    }

    Ok(output)
}
