pub fn run() {
    let langs = graft_langs::all();
    println!("Available extensions ({}):", langs.len());
    for lang in langs {
        println!("  {} (extends {})", lang.name(), lang.base_name());
    }
}
