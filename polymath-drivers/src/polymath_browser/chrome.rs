/// Construct Chrome command‑line arguments for a session.
pub fn build_chrome_arguments(headless: bool) -> Vec<String> {
    let mut args = vec![
        "--disable-infobars".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--no-sandbox".to_string(),
        "--disable-extensions".to_string(),
        "--window-size=1920,1080".to_string(),
        "--lang=en-US,en".to_string(),
    ];
    if headless {
        args.push("--headless=new".to_string());
        args.push("--disable-gpu".to_string());
    }
    args
}
