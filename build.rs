use std::env;

fn main() {
    // ホストブリッジのグローバル名をビルド時に埋め込む
    match env::var("HOST_BRIDGE_GLOBAL") {
        Ok(name) if !name.trim().is_empty() => {
            println!("cargo:warning=HOST_BRIDGE_GLOBAL set to {}", name.trim());
            println!("cargo:rustc-env=HOST_BRIDGE_GLOBAL={}", name.trim());
        }
        _ => {}
    }

    // 環境変数が変わったら再ビルド
    println!("cargo:rerun-if-env-changed=HOST_BRIDGE_GLOBAL");
}
