#[cfg(test)]
pub const TEST_POST_MD: &str = r##"---
title: "Test Post Title"
description: "This is a test post description"
pubDate: 2025-12-14
author: "Test Author"
tags: [Test, Example]
---

## Introduction

This is a post with **test content** used by the unit tests.

- First item
- Second item

Call `list_published()` and read the [docs](https://example.com/docs).
"##;

#[cfg(test)]
pub const DRAFT_POST_MD: &str = r##"---
title: "Work in progress"
description: "Not ready yet"
pubDate: 2025-12-20
draft: true
---

Still writing this one.
"##;

#[cfg(test)]
pub const NO_TITLE_MD: &str = r##"---
description: "Somebody forgot the title"
pubDate: 2025-11-01
---

Orphan body.
"##;

#[cfg(test)]
pub const OLDER_POST_MD: &str = r##"---
title: "An older post"
description: "From the archive"
pubDate: 2024-06-30
tags:
  - archive
---

Older content with a table:

| Year | Posts |
|------|-------|
| 2024 | 1     |
"##;

#[cfg(test)]
pub const SAME_DAY_POST_MD: &str = r##"---
title: "Another post on the same day"
pubDate: 2025-12-14
author: "Second Author"
---

Same day, different slug.
"##;
