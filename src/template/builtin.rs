//! Starter templates shipped with the binary.
//!
//! Kept as in-source string constants so a fresh install can scaffold
//! without any template directory on disk. User templates with the same
//! name take priority during discovery.

/// One embedded template: its `template.yaml` content plus the files to
/// render, as (relative path, content) pairs.
#[derive(Debug)]
pub struct BuiltinTemplate {
    pub name: &'static str,
    pub metadata: &'static str,
    pub files: &'static [(&'static str, &'static str)],
}

pub fn all() -> &'static [BuiltinTemplate] {
    BUILTINS
}

pub fn find(name: &str) -> Option<&'static BuiltinTemplate> {
    BUILTINS.iter().find(|t| t.name == name)
}

static BUILTINS: &[BuiltinTemplate] = &[
    BuiltinTemplate {
        name: "node-app",
        metadata: "\
name: node-app
description: Minimal Node.js application
variables:
  - name: name
    description: Project name
    required: true
  - name: description
    description: Project description
    default: \"\"
",
        files: &[
            (
                "src/index.js",
                "\
// {{name}}
console.log('{{name}} is running');
",
            ),
            (
                "README.md",
                "\
# {{name}}

{{description}}

## Scripts

- `start` - run the application
",
            ),
            (
                ".gitignore",
                "\
node_modules/
dist/
*.log
",
            ),
        ],
    },
    BuiltinTemplate {
        name: "express-api",
        metadata: "\
name: express-api
description: Express HTTP API starter
variables:
  - name: name
    description: Project name
    required: true
  - name: description
    description: Project description
    default: \"\"
  - name: port
    description: HTTP port
    default: \"3000\"
dependencies:
  express: \"^4.18.2\"
devDependencies:
  nodemon: \"latest\"
",
        files: &[
            (
                "src/index.js",
                "\
const express = require('express');
const routes = require('./routes');

const app = express();
const port = process.env.PORT || {{port}};

app.use(express.json());
app.use('/', routes);

app.listen(port, () => {
  console.log('{{name}} listening on port ' + port);
});
",
            ),
            (
                "src/routes/index.js",
                "\
const { Router } = require('express');

const router = Router();

router.get('/health', (req, res) => {
  res.json({ status: 'ok' });
});

module.exports = router;
",
            ),
            (
                "README.md",
                "\
# {{name}}

{{description}}

## Development

- `dev` - start with automatic reload
- `start` - start the server
",
            ),
            (
                ".gitignore",
                "\
node_modules/
dist/
*.log
",
            ),
        ],
    },
];
