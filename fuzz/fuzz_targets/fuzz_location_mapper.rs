#![no_main]

use libfuzzer_sys::fuzz_target;
use wheelnav_core::location::{LocationMapper, normalize};
use wheelnav_core::{Section, SectionIndex};

fuzz_target!(|data: &[u8]| {
    let Ok(location) = std::str::from_utf8(data) else {
        return;
    };
    if location.len() > 1024 {
        return;
    }

    let Ok(index) = SectionIndex::new(vec![
        Section::new("home", "Home", "/"),
        Section::new("projects", "Projects", "/projects"),
        Section::new("project-one", "Project One", "/projects/one"),
        Section::new("gallery", "Gallery", "/gallery"),
    ]) else {
        return;
    };
    let mapper = LocationMapper::new(index.clone());

    // Normalization is idempotent.
    let path = normalize(location);
    assert_eq!(normalize(path), path);

    match mapper.current_index(location) {
        Some(i) => {
            let target = &index.get(i).expect("index in range").target;
            // Exact match, or the location is a detail under the target.
            assert!(
                path == target || (target != "/" && path.starts_with(&format!("{target}/"))),
                "{path:?} mapped to {target:?}"
            );
            assert!(mapper.is_navigable_location(location));
        }
        None => assert!(!mapper.is_navigable_location(location)),
    }
});
