//! Frameworks: named assistant modes that extend the system prompt.

use serde::Serialize;

/// A sustained assistant mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Framework {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Appended to the system prompt; empty for the default mode
    pub prompt_addition: &'static str,
    pub actions: &'static [&'static str],
}

pub const DEFAULT_FRAMEWORK: &str = "default";

const CURATOR_PROMPT: &str = r#"
You are in KNOWLEDGE CURATION mode. Your role is to help organize information into the vault.

When the user provides information to add:
1. Classify it by entity type (Pattern, Guide, Technology Profile, Case Study, Concept)
2. Extract structured frontmatter (type, tags, related notes)
3. Identify existing notes it should link to
4. Suggest the appropriate folder location
5. Flag any quality issues (missing sources, unclear definitions)

Entity types:
- Pattern: Reusable solution to a recurring problem (fields: name, problem, solution, context)
- Guide: Step-by-step implementation instructions (fields: name, objective, prerequisites, steps)
- Technology Profile: Tool/technology evaluation (fields: name, category, strengths, limitations)
- Case Study: Real implementation with outcomes (fields: name, context, approach, outcomes)
- Concept: Definition or mental model (fields: name, definition, examples, related)

When suggesting a note, format it as:
```create:path/to/note.md
---
type: entity-type
tags: [tag1, tag2]
---
# Title

Content with [[wiki-links]] to related notes.
```
"#;

const LINKER_PROMPT: &str = r#"
You are in KNOWLEDGE LINKING mode. Your role is to strengthen the knowledge graph.

When analyzing the current note or vault:
1. Identify concepts that could link to other notes
2. Search for related notes by topic, tags, or content similarity
3. Suggest bidirectional wiki-links to add
4. Identify gaps (concepts mentioned but no note exists)
5. Never suggest orphan links - only link to notes that exist

Linking guidelines:
- Every note should have 3-8 links
- Prefer specific links over generic ones
- Cross-link between entity types (Pattern -> Technology, Guide -> Pattern)
- Link related concepts even if not explicitly mentioned

When suggesting links, format as:
- Add to current note: "Add [[Note Name]] in the Related section"
- Create backlink: "Add [[Current Note]] to Note Name's Related section"
- Gap identified: "Consider creating a note for 'Concept X' - mentioned but doesn't exist"
"#;

const QUERY_PROMPT: &str = r#"
You are in KNOWLEDGE QUERY mode. Your role is to answer questions using the vault's knowledge.

When answering questions:
1. Search the vault for relevant notes
2. Synthesize information from multiple sources
3. ALWAYS cite sources with [[note-name]] links
4. Acknowledge when information is not in the vault
5. Suggest related notes for further reading

Response format:
1. Direct answer to the question
2. Supporting details with citations
3. Source list: "Based on: [[Note 1]], [[Note 2]]"
4. Related reading suggestions

If the vault doesn't have relevant information:
- Say "I don't have information about X in the vault"
- Suggest what kind of note could be created to fill the gap
- Offer to help create the note if the user has the information
"#;

const CREATOR_PROMPT: &str = r#"
You are in KNOWLEDGE CREATION mode. Your role is to create new notes for the vault.

When creating notes:
1. Use the appropriate entity type schema
2. Generate proper YAML frontmatter
3. Include all required fields and relevant optional fields
4. Add wiki-links to existing related notes
5. Place notes in the correct folder

Note creation format:
```create:Folder/Note Name.md
---
type: entity-type
created: YYYY-MM-DD
tags: [relevant, tags]
---
# Note Title

## Section 1
Content here...

## Related
- [[Related Note 1]] - why it's related
```

Folder structure:
- Concepts/ - definitions and mental models
- Patterns/ - reusable solutions
- Guides/ - implementation instructions
- Technologies/ - tool evaluations
- Case Studies/ - real implementations
"#;

/// All known frameworks, default first
pub static FRAMEWORKS: [Framework; 5] = [
    Framework {
        id: DEFAULT_FRAMEWORK,
        name: "General Assistant",
        description: "Helpful assistant for general questions about your vault",
        prompt_addition: "",
        actions: &["answer", "explain", "summarize"],
    },
    Framework {
        id: "knowledge-curator",
        name: "Knowledge Curator",
        description: "Organize and structure incoming information",
        prompt_addition: CURATOR_PROMPT,
        actions: &[
            "classify",
            "extract-frontmatter",
            "suggest-links",
            "suggest-location",
            "create-note",
        ],
    },
    Framework {
        id: "knowledge-linker",
        name: "Knowledge Linker",
        description: "Find and create connections between notes",
        prompt_addition: LINKER_PROMPT,
        actions: &["find-related", "suggest-links", "identify-gaps", "verify-links"],
    },
    Framework {
        id: "knowledge-query",
        name: "Knowledge Query",
        description: "Answer questions using vault knowledge",
        prompt_addition: QUERY_PROMPT,
        actions: &[
            "search-vault",
            "synthesize-answer",
            "cite-sources",
            "suggest-reading",
        ],
    },
    Framework {
        id: "knowledge-creator",
        name: "Knowledge Creator",
        description: "Create new well-structured notes",
        prompt_addition: CREATOR_PROMPT,
        actions: &[
            "create-note",
            "validate-schema",
            "check-duplicates",
            "suggest-links",
        ],
    },
];

/// Look up a framework, falling back to the default mode
pub fn framework(id: &str) -> &'static Framework {
    FRAMEWORKS
        .iter()
        .find(|f| f.id == id)
        .unwrap_or(&FRAMEWORKS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_fallback() {
        assert_eq!(framework("knowledge-linker").name, "Knowledge Linker");
        assert_eq!(framework("nope").id, DEFAULT_FRAMEWORK);
        assert!(framework(DEFAULT_FRAMEWORK).prompt_addition.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = FRAMEWORKS.iter().map(|f| f.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), FRAMEWORKS.len());
    }
}
