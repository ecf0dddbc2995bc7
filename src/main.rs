use imagestudio::{
    AspectRatio, Config, CreateStyle, GenerationRequest, ImageFormat, StudioClient,
};
use std::env;
use std::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    imagestudio::logger::init_with_config(
        imagestudio::logger::LoggerConfig::development()
            .with_level(imagestudio::logger::LogLevel::Debug),
    )?;

    imagestudio::logger::log_startup_info("imagestudio", env!("CARGO_PKG_VERSION"));

    log::info!("🔍 Checking backend environment...");
    for key in [
        "OPENROUTER_API_KEY",
        "HUGGINGFACE_API_TOKEN",
        "REPLICATE_API_TOKEN",
        "GEMINI_API_KEY",
    ] {
        match env::var(key) {
            Ok(value) => log::info!("✅ {} set ({} characters)", key, value.len()),
            Err(_) => log::warn!("⚠️  {} not set, that backend will be skipped", key),
        }
    }

    let config = Config::from_env();
    imagestudio::logger::log_config_info(&config);

    log::info!("🔄 Creating studio client...");
    let mut client = match StudioClient::new(config).await {
        Ok(client) => {
            log::info!("✅ Studio client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize studio client: {}", e);
            return Err(e.into());
        }
    };

    let prompt = env::args()
        .nth(1)
        .unwrap_or_else(|| "a red lighthouse under a blue sky at sunset".to_string());

    log::info!("🎨 Generating: {}", prompt);

    let request = GenerationRequest::new(&prompt)
        .with_aspect_ratio(AspectRatio::Wide)
        .with_create_styles(vec![CreateStyle::Cinematic]);

    match client.generate(request).await {
        Ok(result) => {
            log::info!("✅ Generation successful!");
            log::info!("🤖 Source backend: {}", result.source_backend.as_str());
            log::info!(
                "📏 Image data length: {} characters",
                result.image_data.len()
            );

            let (filename, bytes) = imagestudio::export_image(&result, ImageFormat::Png)?;
            match fs::write(&filename, bytes) {
                Ok(_) => log::info!("💾 Image saved to: {}", filename),
                Err(e) => log::error!("❌ Failed to save image: {}", e),
            }

            log::info!("📚 History entries: {}", client.history().len());
        }
        Err(e) => {
            log::error!("❌ Generation failed: {}", e);
            return Err(e.into());
        }
    }

    log::info!("🎉 Done!");
    Ok(())
}
