//! Conversions between API shapes and catalog entities. No I/O.

use herodex_domain::{Hero, HeroWithSuperpowers, NewHero, Superpower};
use herodex_shared::{HeroInput, HeroView, SuperpowerView};

/// Build an unsaved hero linked to the already resolved superpowers.
pub(super) fn request_to_entity(request: &HeroInput, superpowers: &[Superpower]) -> NewHero {
    NewHero::new(
        request.real_name.clone(),
        request.hero_name.clone(),
        request.date_of_birth,
        request.height,
        request.weight,
    )
    .with_superpowers(superpowers.iter().map(|s| s.id))
}

pub(super) fn entity_to_response(entry: &HeroWithSuperpowers) -> HeroView {
    let hero = &entry.hero;
    HeroView {
        id: hero.id.get(),
        real_name: hero.real_name.clone(),
        hero_name: hero.hero_name.clone(),
        date_of_birth: hero.date_of_birth,
        height: hero.height,
        weight: hero.weight,
        superpowers: entry.superpowers.iter().map(superpower_to_view).collect(),
    }
}

/// Full replace of `existing` from `request`; the id is kept.
pub(super) fn apply_update(existing: &mut Hero, request: &HeroInput, superpowers: &[Superpower]) {
    existing.overwrite(request_to_entity(request, superpowers));
}

pub(super) fn superpower_to_view(superpower: &Superpower) -> SuperpowerView {
    SuperpowerView {
        id: superpower.id.get(),
        name: superpower.name.clone(),
        description: superpower.description.clone(),
    }
}
