use std::collections::HashMap;

use kanji_wallpapers::{
    CancelPrompt, CardCollection, CompoundCache, CompoundEntry, CompoundTable, Error, FixedPrompt,
    GenerationSettings, KanjiEntry, LogProgress, NotesFile, Preset, ResolutionChoice, Theme,
    WallpaperFont, WallpaperRenderer, generate, resolve,
};

fn test_font() -> WallpaperFont {
    let bytes = include_bytes!("fixtures/DejaVuSans.ttf");
    WallpaperFont::from_bytes(bytes.to_vec()).unwrap()
}

fn dictionary() -> HashMap<String, KanjiEntry> {
    HashMap::from([
        ("水".to_string(), KanjiEntry::new(["みず"], ["スイ"])),
        ("火".to_string(), KanjiEntry::new(["ひ", "ほ"], ["カ"])),
    ])
}

fn compounds() -> CompoundCache {
    CompoundCache::preloaded(CompoundTable::from_iter([
        ("水", CompoundEntry::new("水曜日", "スイヨウビ", "5", "Wednesday")),
        ("水", CompoundEntry::new("水道", "すいどう", "4", "water supply")),
    ]))
}

const NOTES: &str = r#"{
    "cards": [
        { "id": 10, "deck": "Kanji", "state": "learn", "fields": { "Kanji": "水" } },
        { "id": 11, "deck": "Kanji", "state": "learn", "fields": { "Kanji": "猫" } },
        { "id": 12, "deck": "Kanji", "state": "learn", "fields": { "Kanji": "水道" } },
        { "id": 13, "deck": "Kanji", "state": "learn", "fields": { "Meaning": "fire" } },
        { "id": 14, "deck": "Kanji", "state": "learn", "fields": { "Kanji": " 火 " } },
        { "id": 15, "deck": "Kanji", "state": "review", "fields": { "Kanji": "木" } }
    ]
}"#;

#[test]
fn batch_skips_bad_cards_and_keeps_going() {
    let font = test_font();
    let dictionary = dictionary();
    let compounds = compounds();
    let renderer = WallpaperRenderer::new(&font, &dictionary, &compounds, Theme::default());
    let notes = NotesFile::from_json(NOTES).unwrap();
    let out = tempfile::tempdir().unwrap();

    let settings = GenerationSettings::new("Kanji");
    let layout = resolve(settings.resolution, &mut CancelPrompt).unwrap();
    let report = generate(
        &notes,
        &settings,
        &layout,
        &renderer,
        out.path(),
        &mut LogProgress,
    )
    .unwrap();

    let names: Vec<_> = report
        .written
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["wallpaper_水.png", "wallpaper_火.png"]);

    let failed: Vec<_> = report.failed.iter().map(|f| f.card).collect();
    assert_eq!(failed, [11, 12, 13]);
    assert!(matches!(report.failed[0].error, Error::KanjiNotFound(_)));
    assert!(matches!(report.failed[1].error, Error::InvalidKanji(_)));
    assert!(matches!(&report.failed[2].error, Error::MissingField(field) if field == "kanji"));
    assert!(report.failed[2].kanji.is_none());
    assert!(!report.is_complete());

    let image = image::open(&report.written[0]).unwrap();
    assert_eq!((image.width(), image.height()), (720, 1280));
    assert!(!out.path().join("wallpaper_猫.png").exists());
}

#[test]
fn output_directory_is_created() {
    let font = test_font();
    let dictionary = dictionary();
    let compounds = compounds();
    let renderer = WallpaperRenderer::new(&font, &dictionary, &compounds, Theme::default());
    let notes = NotesFile::from_json(NOTES).unwrap();
    let root = tempfile::tempdir().unwrap();
    let out = root.path().join("nested").join("kanji_wallpapers");

    let settings = GenerationSettings::new("Kanji").with_card_type("is:review");
    let report = generate(
        &notes,
        &settings,
        &Preset::Svga800x600.layout(),
        &renderer,
        &out,
        &mut LogProgress,
    )
    .unwrap();

    // 木 is not in the dictionary; the directory still exists.
    assert!(out.is_dir());
    assert!(report.written.is_empty());
    assert_eq!(report.failed.len(), 1);
}

#[test]
fn custom_resolution_uses_prompt_answer() {
    let custom = Preset::Xga1024x768.layout();
    let layout = resolve(ResolutionChoice::Custom, &mut FixedPrompt(custom)).unwrap();
    assert_eq!(layout, custom);

    assert!(resolve(ResolutionChoice::Custom, &mut CancelPrompt).is_none());
}

#[test]
fn settings_file_drives_the_query() {
    let settings = GenerationSettings::from_json(
        r#"{ "deck": "Kanji", "cardType": "is:review", "resolution": "1600x1200" }"#,
    )
    .unwrap();
    let notes = NotesFile::from_json(NOTES).unwrap();

    assert_eq!(notes.find_cards(&settings.card_query()).unwrap(), [15]);
    assert_eq!(
        settings.resolution,
        ResolutionChoice::Preset(Preset::Uxga1600x1200)
    );
}
