use std::env;
use std::path::PathBuf;

const WATCHED_VARIABLES: [&str; 4] = ["FFMPEG_DIR", "VCPKG_ROOT", "VCPKGRS_DYNAMIC", "VCPKGRS_TRIPLET"];

fn main() {
    // Only the `ffmpeg` feature links against FFmpeg; the formatter alone
    // needs no native libraries.
    if env::var_os("CARGO_FEATURE_FFMPEG").is_none() {
        return;
    }

    for variable in WATCHED_VARIABLES {
        println!("cargo:rerun-if-env-changed={variable}");
    }

    // ffmpeg-sys-next finds pkg-config installs on its own; Windows needs a hint.
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os != "windows" || env::var_os("FFMPEG_DIR").is_some() {
        return;
    }

    match vcpkg_ffmpeg_dir() {
        Some(ffmpeg_dir) if ffmpeg_dir.exists() => {
            println!(
                "cargo:warning=probe-report: using vcpkg FFmpeg at {0}; export FFMPEG_DIR={0} to skip this lookup.",
                ffmpeg_dir.display(),
            );
            if env::var_os("VCPKGRS_DYNAMIC").is_none() {
                println!(
                    "cargo:warning=probe-report: set VCPKGRS_DYNAMIC=1 if the vcpkg FFmpeg build is dynamic."
                );
            }
        }
        Some(ffmpeg_dir) => println!(
            "cargo:warning=probe-report: no FFmpeg under {}; install ffmpeg with vcpkg or set FFMPEG_DIR.",
            ffmpeg_dir.display(),
        ),
        None => println!(
            "cargo:warning=probe-report: the `ffmpeg` feature needs FFmpeg. Set FFMPEG_DIR, or VCPKG_ROOT for a vcpkg install."
        ),
    }
}

fn vcpkg_ffmpeg_dir() -> Option<PathBuf> {
    let vcpkg_root = env::var_os("VCPKG_ROOT")?;
    let triplet = env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| "x64-windows".to_string());
    Some(PathBuf::from(vcpkg_root).join("installed").join(triplet))
}
