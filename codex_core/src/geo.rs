//! Geographic hierarchy normalization.
//!
//! Every place-like record declares the full parent chain, the continent
//! count stays under a configured cap, and no record is left pointing at
//! geography that no longer exists.

use std::collections::HashSet;

use tracing::{debug, warn};

use lore_model::{
    is_placeholder, Codex, GeoFields, GeoLevel, GeoRecord, PlaceRecord, Provenance, RegionRecord,
    UNKNOWN,
};

use crate::config::CodexConfig;
use crate::normalize::norm_key;

/// Normalize the codex's geography in place. Idempotent and total: a second
/// run over the same codex changes nothing, and no input errors.
pub fn normalize(codex: &mut Codex, config: &CodexConfig) {
    for place in &mut codex.places {
        place.geo.fill_missing(&config.world);
    }
    for region in &mut codex.regions {
        region.geo.fill_missing(&config.world);
        if is_placeholder(&region.geo.region) {
            region.geo.region = region.name.clone();
        }
    }
    for level in GeoLevel::all() {
        for record in codex.geo_level_mut(level) {
            record.geo.fill_missing(&config.world);
            let own = record.geo.level_mut(level);
            if is_placeholder(own) {
                *own = record.name.clone();
            }
        }
    }

    enforce_continent_cap(codex, config.max_continents);
    ensure_home_geography(codex, config);
}

/// Truncate the continent list to the configured cap (first N by insertion
/// order) and rewrite references to truncated continents back to "unknown".
fn enforce_continent_cap(codex: &mut Codex, max_continents: usize) {
    if max_continents == 0 || codex.continents.len() <= max_continents {
        return;
    }

    let dropped: Vec<String> = codex
        .continents
        .drain(max_continents..)
        .map(|c| c.name)
        .collect();
    warn!(
        kept = max_continents,
        dropped = dropped.len(),
        "continent cap exceeded; truncating"
    );

    let surviving: HashSet<String> = codex
        .continents
        .iter()
        .map(|c| norm_key(&c.name))
        .collect();
    let dropped_keys: HashSet<String> = dropped
        .iter()
        .map(|name| norm_key(name))
        .filter(|key| !surviving.contains(key))
        .collect();

    let rewrite = |geo: &mut GeoFields| {
        if dropped_keys.contains(&norm_key(&geo.continent)) {
            geo.continent = UNKNOWN.to_string();
        }
    };
    for place in &mut codex.places {
        rewrite(&mut place.geo);
    }
    for region in &mut codex.regions {
        rewrite(&mut region.geo);
    }
    for level in GeoLevel::all() {
        if level == GeoLevel::Continent {
            continue;
        }
        for record in codex.geo_level_mut(level) {
            rewrite(&mut record.geo);
        }
    }
}

/// Auto-create placeholder place/region/realm records for every character
/// home reference that does not resolve yet.
pub fn ensure_home_geography(codex: &mut Codex, config: &CodexConfig) {
    let mut place_keys: HashSet<String> =
        codex.places.iter().map(|p| norm_key(&p.name)).collect();
    let mut region_keys: HashSet<String> =
        codex.regions.iter().map(|r| norm_key(&r.name)).collect();
    let mut realm_keys: HashSet<String> = codex
        .realms
        .iter()
        .map(|r| norm_key(&r.name))
        .collect();

    // (name, declared region, declared realm) triples to materialize.
    let mut new_places: Vec<(String, String, String)> = Vec::new();
    let mut new_regions: Vec<(String, String)> = Vec::new();
    let mut new_realms: Vec<String> = Vec::new();

    for character in &codex.characters {
        let home_place = character.home_place.trim();
        if !is_placeholder(home_place) && place_keys.insert(norm_key(home_place)) {
            new_places.push((
                home_place.to_string(),
                character.home_region.trim().to_string(),
                character.home_realm.trim().to_string(),
            ));
        }
        let home_region = character.home_region.trim();
        if !is_placeholder(home_region) && region_keys.insert(norm_key(home_region)) {
            new_regions.push((
                home_region.to_string(),
                character.home_realm.trim().to_string(),
            ));
        }
        let home_realm = character.home_realm.trim();
        if !is_placeholder(home_realm) && realm_keys.insert(norm_key(home_realm)) {
            new_realms.push(home_realm.to_string());
        }
    }

    for (name, region, realm) in new_places {
        debug!(place = %name, "creating placeholder for character home");
        let mut place = PlaceRecord::new(name);
        if !is_placeholder(&region) {
            place.geo.region = region;
        }
        if !is_placeholder(&realm) {
            place.geo.realm = realm;
        }
        place.geo.fill_missing(&config.world);
        place.provenance = Provenance::seed(Vec::new());
        codex.places.push(place);
    }
    for (name, realm) in new_regions {
        debug!(region = %name, "creating placeholder for character home");
        let mut region = RegionRecord::new(name);
        region.geo.region = region.name.clone();
        if !is_placeholder(&realm) {
            region.geo.realm = realm;
        }
        region.geo.fill_missing(&config.world);
        region.provenance = Provenance::seed(Vec::new());
        codex.regions.push(region);
    }
    for name in new_realms {
        debug!(realm = %name, "creating placeholder for character home");
        let mut realm = GeoRecord::new(name);
        realm.geo.realm = realm.name.clone();
        realm.geo.fill_missing(&config.world);
        realm.provenance = Provenance::seed(Vec::new());
        codex.realms.push(realm);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lore_model::CharacterRecord;

    fn config_with_cap(max_continents: usize) -> CodexConfig {
        CodexConfig {
            max_continents,
            ..CodexConfig::default()
        }
    }

    #[test]
    fn test_parent_chain_completed() {
        let mut codex = Codex::new();
        let mut place = PlaceRecord::new("Ashmere");
        place.geo.world = String::new();
        place.geo.realm = String::new();
        codex.places.push(place);

        normalize(&mut codex, &CodexConfig::default());

        let geo = &codex.places[0].geo;
        assert_eq!(geo.world, "The Known World");
        assert_eq!(geo.realm, UNKNOWN);
        for level in GeoLevel::all() {
            assert!(!geo.level(level).is_empty());
        }
    }

    #[test]
    fn test_geo_level_self_field_defaults_to_name() {
        let mut codex = Codex::new();
        codex.continents.push(GeoRecord::new("Vharn"));
        codex.realms.push(GeoRecord::new("Realm of Ashmere"));

        normalize(&mut codex, &CodexConfig::default());

        assert_eq!(codex.continents[0].geo.continent, "Vharn");
        assert_eq!(codex.realms[0].geo.realm, "Realm of Ashmere");
    }

    #[test]
    fn test_continent_cap_truncates_and_rewrites() {
        let mut codex = Codex::new();
        for name in ["Vharn", "Oskarra", "Teth"] {
            codex.continents.push(GeoRecord::new(name));
        }
        let mut place = PlaceRecord::new("Ashmere");
        place.geo.continent = "Teth".into();
        codex.places.push(place);
        let mut region = RegionRecord::new("The Reach");
        region.geo.continent = "Vharn".into();
        codex.regions.push(region);

        normalize(&mut codex, &config_with_cap(2));

        assert_eq!(codex.continents.len(), 2);
        assert_eq!(codex.places[0].geo.continent, UNKNOWN);
        assert_eq!(codex.regions[0].geo.continent, "Vharn");
    }

    #[test]
    fn test_home_placeholders_created_once() {
        let mut codex = Codex::new();
        let mut kael = CharacterRecord::new("Kael");
        kael.home_place = "Vethis".into();
        kael.home_region = "The Reach".into();
        kael.home_realm = "Realm of Ashmere".into();
        codex.characters.push(kael);

        normalize(&mut codex, &CodexConfig::default());
        normalize(&mut codex, &CodexConfig::default());

        assert_eq!(codex.places.len(), 1);
        assert_eq!(codex.regions.len(), 1);
        assert_eq!(codex.realms.len(), 1);
        assert_eq!(codex.places[0].name, "Vethis");
        assert_eq!(codex.places[0].geo.region, "The Reach");
        assert_eq!(codex.places[0].geo.realm, "Realm of Ashmere");
        assert_eq!(codex.realms[0].geo.realm, "Realm of Ashmere");
    }

    #[test]
    fn test_normalize_idempotent() {
        let mut codex = Codex::new();
        for name in ["Vharn", "Oskarra", "Teth"] {
            codex.continents.push(GeoRecord::new(name));
        }
        let mut place = PlaceRecord::new("Ashmere");
        place.geo.continent = "Teth".into();
        codex.places.push(place);
        let mut kael = CharacterRecord::new("Kael");
        kael.home_realm = "Realm of Ashmere".into();
        codex.characters.push(kael);

        let config = config_with_cap(2);
        normalize(&mut codex, &config);
        let once = codex.clone();
        normalize(&mut codex, &config);
        assert_eq!(codex, once);
    }
}
