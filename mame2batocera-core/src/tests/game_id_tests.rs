use super::*;

#[test]
fn bare_names_are_trimmed_and_lowercased() {
    assert_eq!(GameId::new("pacman").unwrap().as_str(), "pacman");
    assert_eq!(GameId::new("  PacMan ").unwrap().as_str(), "pacman");
}

#[test]
fn empty_names_are_rejected() {
    assert!(GameId::new("").is_none());
    assert!(GameId::new("   ").is_none());
}

#[test]
fn gamelist_paths_resolve_to_set_name() {
    assert_eq!(GameId::from_path_like("./pacman.zip").unwrap().as_str(), "pacman");
    assert_eq!(
        GameId::from_path_like("./arcade/Galaga.7z").unwrap().as_str(),
        "galaga"
    );
}

#[test]
fn archive_entries_resolve_to_set_name() {
    assert_eq!(GameId::from_path_like("snap/dkong.png").unwrap().as_str(), "dkong");
    assert_eq!(GameId::from_path_like("flyers\\1942.png").unwrap().as_str(), "1942");
}

#[test]
fn names_without_extension_are_kept_whole() {
    assert_eq!(GameId::from_path_like("./mslug").unwrap().as_str(), "mslug");
    assert_eq!(GameId::from_path_like(".hidden").unwrap().as_str(), ".hidden");
}

#[test]
fn all_sources_agree_on_the_same_key() {
    let from_dat = GameId::new("pacman").unwrap();
    let from_extras = GameId::from_path_like("snap/PACMAN.png").unwrap();
    let from_gamelist = GameId::from_path_like("./pacman.zip").unwrap();
    assert_eq!(from_dat, from_extras);
    assert_eq!(from_dat, from_gamelist);
}

#[test]
fn borrows_as_str_for_map_lookups() {
    let mut map = std::collections::HashMap::new();
    map.insert(GameId::new("pacman").unwrap(), 1);
    assert_eq!(map.get("pacman"), Some(&1));
}
