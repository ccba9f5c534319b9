use cl_demos::ppm::{encoded_len, header, save_ppm, write_ppm};

fn px(r: u8, g: u8, b: u8) -> i32 {
    i32::from_ne_bytes([r, g, b, 0xee])
}

#[test]
fn header_is_literal_p6() {
    assert_eq!(header(1200, 800), "P6\n1200 800\n255\n");
}

#[test]
fn full_size_image_length() {
    let pixels = vec![0_i32; 1200 * 800];
    let mut out = Vec::new();
    write_ppm(&mut out, 1200, 800, &pixels).unwrap();

    let head = b"P6\n1200 800\n255\n";
    assert_eq!(&out[..head.len()], head);
    assert_eq!(out.len(), head.len() + 3 * 1200 * 800 + 1);
    assert_eq!(out.len(), encoded_len(1200, 800));
    assert_eq!(out.last(), Some(&b'\n'));
}

#[test]
fn rows_are_flipped_and_alpha_dropped() {
    // source row 0 = bottom of the image
    let pixels = [
        px(1, 2, 3), px(4, 5, 6),
        px(7, 8, 9), px(10, 11, 12),
    ];
    let mut out = Vec::new();
    write_ppm(&mut out, 2, 2, &pixels).unwrap();

    let head = header(2, 2);
    let body = &out[head.len()..];
    assert_eq!(body, &[7, 8, 9, 10, 11, 12, 1, 2, 3, 4, 5, 6, b'\n']);
}

#[test]
fn pixel_count_mismatch_is_invalid_input() {
    let mut out = Vec::new();
    let err = write_ppm(&mut out, 3, 3, &[0; 8]).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    assert!(out.is_empty());
}

#[test]
fn save_ppm_writes_file() {
    let path = std::env::temp_dir().join(format!("cl_demos_ppm_{}.ppm", std::process::id()));
    let pixels = vec![px(255, 0, 0); 4 * 3];
    save_ppm(&path, 4, 3, &pixels).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(bytes.len(), encoded_len(4, 3));
    assert!(bytes.starts_with(b"P6\n4 3\n255\n"));
    assert_eq!(&bytes[11..14], &[255, 0, 0]);
}
