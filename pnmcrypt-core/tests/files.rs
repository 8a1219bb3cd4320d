use std::fs;
use std::path::{Path, PathBuf};

use pnmcrypt_core::{
    ContentError, LoadError, LoadErrorKind, Lfsr, NameError, Variant, WriteError,
    encode_pnm, encrypt_image, load_pnm, password_to_seed, write_pnm_in,
};
use tempfile::TempDir;

const CORRECT_PPM: &str = "P3
# created by hand
4 2
255
255 0 0   0 255 0   0 0 255   255 255 255
0 0 0     12 34 56  78 90 12  200 100 50
";

const COMMENT_BETWEEN_ROWS_PPM: &str = "P3
2 2
255
1 2 3 4 5 6
# second row follows
7 8 9 10 11 12
";

fn fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn kind(path: &Path) -> LoadErrorKind {
    load_pnm(path).unwrap_err().kind()
}

#[test]
fn test_load_pnm_result_categories() {
    let dir = TempDir::new().unwrap();

    assert_eq!(
        kind(&dir.path().join("thisFileDoNotExist.ppm")),
        LoadErrorKind::Resource
    );

    let mismatch = fixture(&dir, "incorrectExtension.pgm", CORRECT_PPM);
    assert_eq!(kind(&mismatch), LoadErrorKind::Naming);

    let no_ext = fixture(&dir, "noExtension", CORRECT_PPM);
    assert!(matches!(
        load_pnm(&no_ext),
        Err(LoadError::Name(NameError::MissingExtension(_)))
    ));

    let magic = fixture(&dir, "nonExistingMagicNumb.ppm", "P7\n1 1\n255\n0 0 0\n");
    assert_eq!(kind(&magic), LoadErrorKind::Content);

    let comment = fixture(
        &dir,
        "commentFrstLine.ppm",
        "# comment\nP3\n1 1\n255\n0 0 0\n",
    );
    assert_eq!(kind(&comment), LoadErrorKind::Content);

    let missing = fixture(&dir, "missPixels.ppm", "P3\n2 2\n255\n1 2 3 4 5 6\n");
    assert!(matches!(
        load_pnm(&missing),
        Err(LoadError::Content(ContentError::MissingPixel { row: 2, col: 1, .. }))
    ));
}

#[test]
fn test_load_pnm_success() {
    let dir = TempDir::new().unwrap();

    let image = load_pnm(fixture(&dir, "correct.ppm", CORRECT_PPM)).unwrap();
    assert_eq!(image.variant(), Variant::Color);
    assert_eq!((image.width(), image.height()), (4, 2));
    assert_eq!(image.get(1, 11), Some(50));

    let image = load_pnm(fixture(
        &dir,
        "commentBtMatrixLines.ppm",
        COMMENT_BETWEEN_ROWS_PPM,
    ))
    .unwrap();
    assert_eq!(image.row(1), Some(&[7, 8, 9, 10, 11, 12][..]));
}

#[test]
fn test_write_pnm_in() {
    let dir = TempDir::new().unwrap();
    let image = load_pnm(fixture(&dir, "correct.ppm", CORRECT_PPM)).unwrap();

    let err = write_pnm_in(&image, dir.path(), "../badPath.ppm").unwrap_err();
    assert!(matches!(err, WriteError::InvalidName(_)));

    write_pnm_in(&image, dir.path(), "goodPath.ppm").unwrap();
    let reloaded = load_pnm(dir.path().join("goodPath.ppm")).unwrap();
    assert_eq!(reloaded, image);
}

#[test]
fn test_write_pnm_in_missing_directory() {
    let dir = TempDir::new().unwrap();
    let image = load_pnm(fixture(&dir, "correct.ppm", CORRECT_PPM)).unwrap();

    let err = write_pnm_in(&image, &dir.path().join("nope"), "out.ppm").unwrap_err();
    assert!(matches!(err, WriteError::Io { .. }));
}

#[test]
fn test_encrypt_write_decrypt() {
    let dir = TempDir::new().unwrap();
    let original = load_pnm(fixture(&dir, "plain.pgm", "P2\n3 1\n15\n1 7 15\n")).unwrap();
    let seed = password_to_seed("MaitreGims").unwrap();

    let mut image = original.clone();
    encrypt_image(&mut image, &mut Lfsr::new(&seed, 7).unwrap());
    write_pnm_in(&image, dir.path(), "cipher.pgm").unwrap();

    let mut image = load_pnm(dir.path().join("cipher.pgm")).unwrap();
    encrypt_image(&mut image, &mut Lfsr::new(&seed, 7).unwrap());

    // the high half of each word leaks back in until the next write truncates it
    assert!(
        image
            .samples()
            .iter()
            .zip(original.samples())
            .all(|(&got, &plain)| got as u16 == plain as u16)
    );
    assert_eq!(encode_pnm(&image), encode_pnm(&original));
}
