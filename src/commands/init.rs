//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    if target_dir.join("_config.yml").exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    // Create directory structure
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("posts"))?;
    fs::create_dir_all(target_dir.join("public/img"))?;
    fs::create_dir_all(target_dir.join("public/logos/employers"))?;
    fs::create_dir_all(target_dir.join("public/portraits"))?;

    // Create default _config.yml
    let config_content = r#"# Site
author: James Walsh
description: Software engineer writing about the web, Rust, and the outdoors.
language: en

# Links
repository: https://github.com/jamesandersonwalsh/portfolio
resume: /resume.pdf
portrait: /portraits/side-profile.webp

# Directory
public_dir: public

# Date format
date_format: MMMM D, YYYY

# Posts: "directory" reads posts/<slug>.md, "hashnode" queries the GraphQL API
content:
  source: directory
  posts_dir: posts
  endpoint: https://api.hashnode.com
  hostname: ''

highlight:
  enable: true
  theme: base16-ocean.dark

# "strict" fails the render, "plain-text" shows the component source instead.
# Any capitalised tag in prose counts as a component, so write generics such
# as `Option<T>` inside backticks.
compile:
  unresolved_components: strict

about:
  entries:
    - title: Where I work
      body: I build web products and the services behind them.
    - title: What I do for fun
      body: Hiking, skiing, and anything else that gets me outside.
"#;

    fs::write(target_dir.join("_config.yml"), config_content)?;

    // Create a sample post
    let now = chrono::Utc::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
cover: /img/hello-world.png
tags: [intro]
---

Welcome! This post lives in `posts/hello-world.md` and is served at `/posts/hello-world`.

<Callout kind="info" title="Components">
Capitalised tags such as this callout are rendered by the component registry.
</Callout>

## Code

```rust
fn main() {{
    println!("Hello, world!");
}}
```
"#,
        now.format("%Y-%m-%dT%H:%M:%SZ")
    );

    fs::write(target_dir.join("posts/hello-world.md"), sample_post)?;

    Ok(())
}
