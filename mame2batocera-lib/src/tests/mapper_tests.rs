use super::*;

use mame2batocera_core::MediaAsset;

fn id(name: &str) -> GameId {
    GameId::new(name).unwrap()
}

fn pacman() -> DatGame {
    let mut game = DatGame::new(id("pacman"));
    game.description = "Pac-Man".to_string();
    game.year = "1980".to_string();
    game.manufacturer = "Namco".to_string();
    game.players = Some("2".to_string());
    game.driver_status = Some("good".to_string());
    game
}

fn media_for(game: &str, categories: &[MediaCategory]) -> MediaIndex {
    let mut index = MediaIndex::new();
    for &category in categories {
        index.insert(MediaAsset {
            id: id(game),
            category,
            entry_name: format!("{game}.png"),
            staged_path: None,
        });
    }
    index
}

#[test]
fn test_release_date() {
    assert_eq!(release_date("1980"), Some("19800101T000000".to_string()));
    assert_eq!(release_date("1996?"), Some("19960101T000000".to_string()));
    assert_eq!(release_date("198?"), None);
    assert_eq!(release_date("19??"), None);
    assert_eq!(release_date(""), None);
}

#[test]
fn test_player_count() {
    assert_eq!(player_count("2"), Some(2));
    assert_eq!(player_count("1-2"), Some(2));
    assert_eq!(player_count("1~4"), Some(4));
    assert_eq!(player_count("0"), None);
    assert_eq!(player_count(""), None);
    assert_eq!(player_count("many"), None);
}

#[test]
fn test_hidden_for_status() {
    assert!(!hidden_for_status(Some("good")));
    assert!(!hidden_for_status(Some("Imperfect")));
    assert!(hidden_for_status(Some("preliminary")));
    assert!(hidden_for_status(Some("protection")));
    assert!(!hidden_for_status(None));
    assert!(!hidden_for_status(Some("")));
}

#[test]
fn test_map_pacman_with_marquee_only() {
    let media = media_for("pacman", &[MediaCategory::Marquee]);
    let mapped = map_game(&pacman(), &media, &MappingSettings::default());

    assert_eq!(mapped.path, "./pacman.zip");
    assert_eq!(mapped.name, "Pac-Man");
    assert_eq!(mapped.desc.as_deref(), Some("Pac-Man"));
    assert_eq!(mapped.releasedate.as_deref(), Some("19800101T000000"));
    assert_eq!(mapped.developer.as_deref(), Some("Namco"));
    assert_eq!(mapped.publisher.as_deref(), Some("Namco"));
    assert_eq!(mapped.players, Some(2));
    assert!(!mapped.hidden);
    assert_eq!(mapped.genre, "Arcade");
    assert_eq!(mapped.marquee.as_deref(), Some("./media/marquees/pacman.png"));
    assert_eq!(mapped.image, None);
    assert_eq!(mapped.thumbnail, None);
}

#[test]
fn test_empty_description_falls_back_to_id() {
    let mut game = pacman();
    game.description.clear();
    let mapped = map_game(&game, &MediaIndex::new(), &MappingSettings::default());
    assert_eq!(mapped.name, "pacman");
    assert_eq!(mapped.desc, None);
}

#[test]
fn test_dat_genre_wins_over_default() {
    let mut game = pacman();
    game.genre = Some("Maze".to_string());
    let mapped = map_game(&game, &MediaIndex::new(), &MappingSettings::default());
    assert_eq!(mapped.genre, "Maze");

    let settings = MappingSettings {
        default_genre: "Coin-Op".to_string(),
        ..MappingSettings::default()
    };
    let mapped = map_game(&pacman(), &MediaIndex::new(), &settings);
    assert_eq!(mapped.genre, "Coin-Op");
}

#[test]
fn test_hide_system_entries() {
    let mut bios = DatGame::new(id("neogeo"));
    bios.is_bios = true;

    let mapped = map_game(&bios, &MediaIndex::new(), &MappingSettings::default());
    assert!(!mapped.hidden);

    let settings = MappingSettings {
        hide_system_entries: true,
        ..MappingSettings::default()
    };
    let mapped = map_game(&bios, &MediaIndex::new(), &settings);
    assert!(mapped.hidden);
}

#[test]
fn test_to_entry_field_order() {
    let media = media_for(
        "pacman",
        &[MediaCategory::Screenshot, MediaCategory::Cover, MediaCategory::Marquee],
    );
    let entry = map_game(&pacman(), &media, &MappingSettings::default()).to_entry();
    let order: Vec<&str> = entry.fields.iter().map(|f| f.tag.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "path",
            "name",
            "desc",
            "image",
            "thumbnail",
            "marquee",
            "releasedate",
            "developer",
            "publisher",
            "genre",
            "players",
            "hidden",
        ]
    );
    assert_eq!(entry.get(tags::THUMBNAIL), Some("./media/covers/pacman.png"));
    assert_eq!(entry.get(tags::HIDDEN), Some("false"));
}

#[test]
fn test_to_entry_omits_absent_fields() {
    let mut game = DatGame::new(id("mystery"));
    game.year = "19??".to_string();
    game.driver_status = Some("preliminary".to_string());

    let entry = map_game(&game, &MediaIndex::new(), &MappingSettings::default()).to_entry();
    let order: Vec<&str> = entry.fields.iter().map(|f| f.tag.as_str()).collect();
    assert_eq!(order, vec!["path", "name", "genre", "hidden"]);
    assert_eq!(entry.get(tags::HIDDEN), Some("true"));
}
