use std::io::Cursor;
use std::path::{Path, PathBuf};

fn write_solid_png(path: &Path, width: u32, height: u32, rgba: [u8; 4]) {
    let raw: Vec<u8> = rgba
        .iter()
        .copied()
        .cycle()
        .take((width * height * 4) as usize)
        .collect();
    let img = image::RgbaImage::from_raw(width, height, raw).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, &buf).unwrap();
}

#[test]
fn cli_dump_writes_frames() {
    let dir = PathBuf::from("target").join("cli_smoke");
    let gallery_dir = dir.join("gallery");
    let out_dir = dir.join("frames");
    std::fs::create_dir_all(&gallery_dir).unwrap();
    let _ = std::fs::remove_dir_all(&out_dir);

    write_solid_png(&gallery_dir.join("a.png"), 2, 2, [255, 0, 0, 255]);
    write_solid_png(&gallery_dir.join("b.png"), 2, 2, [0, 0, 255, 255]);

    let exe = std::env::var_os("CARGO_BIN_EXE_fadeloop")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "fadeloop.exe"
            } else {
                "fadeloop"
            });
            p
        });

    let status = std::process::Command::new(exe)
        .arg("dump")
        .arg(&gallery_dir)
        .arg("--out")
        .arg(&out_dir)
        .args(["--ticks", "4", "--transition-ticks", "4"])
        .status()
        .unwrap();

    assert!(status.success());
    for idx in 0..4 {
        assert!(out_dir.join(format!("frame_{idx:06}.png")).exists());
    }

    let last = image::open(out_dir.join("frame_000003.png")).unwrap().to_rgba8();
    assert!(last.pixels().all(|px| px.0 == [0, 0, 255, 255]));
}
