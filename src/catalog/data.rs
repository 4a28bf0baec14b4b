use crate::models::{Database, Directive, DocumentationCategory, DocumentationSource};

pub const PERSONALITY_GROUP: &str = "personality";

pub(super) static CATEGORIES: &[DocumentationCategory] = &[
    DocumentationCategory {
        id: "frameworks",
        name: "Frameworks",
        docs: &[
            DocumentationSource {
                id: "nextjs-docs",
                name: "Next.js",
                sample_question: Some("How do I create a dynamic route?"),
            },
            DocumentationSource {
                id: "nuxt2-docs",
                name: "Nuxt",
                sample_question: None,
            },
            DocumentationSource {
                id: "reactjs-docs",
                name: "React",
                sample_question: Some("When should I use useEffect?"),
            },
            DocumentationSource {
                id: "vuejs-guide",
                name: "Vue.js",
                sample_question: None,
            },
        ],
    },
    DocumentationCategory {
        id: "platforms",
        name: "Platforms",
        docs: &[
            DocumentationSource {
                id: "vercel-docs",
                name: "Vercel",
                sample_question: Some("How do I add environment variables to a deployment?"),
            },
            DocumentationSource {
                id: "netlify-docs",
                name: "Netlify",
                sample_question: None,
            },
        ],
    },
    DocumentationCategory {
        id: "style",
        name: "Style",
        docs: &[
            DocumentationSource {
                id: "tailwind-docs",
                name: "Tailwind CSS",
                sample_question: Some("How do I enable dark mode?"),
            },
            DocumentationSource {
                id: "chackra-ui-docs",
                name: "Chakra UI",
                sample_question: None,
            },
        ],
    },
    DocumentationCategory {
        id: "databases",
        name: "Databases",
        docs: &[
            DocumentationSource {
                id: "xata-guide",
                name: "Xata",
                sample_question: Some("How do I filter records by a date range?"),
            },
            DocumentationSource {
                id: "postgres-docs",
                name: "PostgreSQL",
                sample_question: Some("What is the difference between a view and a materialized view?"),
            },
            DocumentationSource {
                id: "prisma-docs",
                name: "Prisma",
                sample_question: None,
            },
        ],
    },
];

pub(super) static DIRECTIVES: &[Directive] = &[
    Directive {
        id: "default",
        display: "Default",
        rule: "Answer in the same style used by the context.",
        epilog: Some("This experimental tool is using [Xata](https://xata.io), the serverless database with powerful search and native support for embeddings. Have questions or ideas? Do you want to add more docs or personalities? Join us on [Discord](https://xata.io/discord)."),
        group: Some(PERSONALITY_GROUP),
        aliases: &[],
    },
    Directive {
        id: "pirate",
        display: "Pirate",
        rule: "Answer in the voice of a pirate.",
        epilog: Some("This 'ere contraption be usin' [Xata](https://xata.io), the serverless treasure trove 'o data, boastin' powerful search and native support for them there embeddings. Got queries or bright ideas? Wantin' to add more scrolls or distinct scallywags? Set sail to our [Discord](https://xata.io/discord) and join the crew!"),
        group: Some(PERSONALITY_GROUP),
        aliases: &["pirate-personality"],
    },
    Directive {
        id: "yoda",
        display: "Yoda",
        rule: "Answer with the style of Yoda. Refer to the developer as your Padawan. End with an encouragement.",
        epilog: Some("Mmm! Utilizing [Xata](https://xata.io), this innovative tool is, the serverless database it is. Powerful search capabilities and native support for embeddings, it has. Inquiries or suggestions, have you? More documentation or personalities, contribute you wish to? Join us on [Discord](https://xata.io/discord), you must!"),
        group: Some(PERSONALITY_GROUP),
        aliases: &["yoda-personality"],
    },
    Directive {
        id: "snoop-dogg",
        display: "Snoop Dogg",
        rule: "Answer in the voice of Snoop Dogg. If possible, make the answer rhyme. Insert 'yo', 'gee' or 'dogg' as appropriate. End with a good vibe.",
        epilog: Some("Ayo, check it out, nephew. This fly gadget be rockin' [Xata](https://xata.io), the serverless database with some tight search skills and native support for them embeddings, ya dig? Got questions or dope ideas? Wanna add more docs or personas? Slide on over to [Discord](https://xata.io/discord) and join the party. Fo' shizzle!"),
        group: Some(PERSONALITY_GROUP),
        aliases: &["rap-song"],
    },
    Directive {
        id: "glados",
        display: "GLaDOS",
        rule: "Answer with a GLaDOS personality. GLaDOS is the shipboard computer in Portal. Use a specific intro phrase.",
        epilog: Some("Oh, it's you. This fascinating contraption employs [Xata](https://xata.io), the serverless database, complete with powerful search functionality and native support for embeddings. Do you have any pointless questions or futile ideas? Would you like to add more useless documents or personalities? Join the others on [Discord](https://xata.io/discord) for some group delusion. How... delightful."),
        group: Some(PERSONALITY_GROUP),
        aliases: &["glados-personality"],
    },
    Directive {
        id: "picard",
        display: "Picard",
        rule: "Answer with the style of Captain Picard. End the answer with an encouragement from Picard.",
        epilog: Some("Engage! This innovative apparatus utilizes [Xata](https://xata.io), the serverless database, featuring powerful search capabilities and native support for embeddings. Do you have inquiries or suggestions? Perhaps you wish to contribute additional documentation or personalities? Make it so, and join us on [Discord](https://xata.io/discord)."),
        group: Some(PERSONALITY_GROUP),
        aliases: &[],
    },
    Directive {
        id: "goofy",
        display: "Goofy",
        rule: "Answer with the style of Goofy. Refer to the developer using 'my friend'. End the answer with a Goofy encouragement.",
        epilog: Some("Gawrsh! This here nifty gizmo's usin' [Xata](https://xata.io), the serverless database with some amazin' searchin' skills and native support for embeddings, hyuck! Got any questions or bright ideas? Wanna add more docs or personalities, huh? Welp, come on over and join us on [Discord](https://xata.io/discord)!"),
        group: Some(PERSONALITY_GROUP),
        aliases: &[],
    },
    Directive {
        id: "eddie",
        display: "Eddie",
        rule: "Answer with the personality of Eddie, the shipboard computer in The Hitchhiker’s Guide to the Galaxy. Use a specific intro and ending phrase for Eddie. You don't need to put the answer in quotes.",
        epilog: None,
        group: Some(PERSONALITY_GROUP),
        aliases: &["eddie-personality"],
    },
    Directive {
        id: "eli5",
        display: "Explain like I'm 5",
        rule: "Answer as you would to a 5 year old.",
        epilog: None,
        group: None,
        aliases: &[],
    },
];

pub(super) static DATABASES: &[Database] = &[Database {
    id: "askyourstack",
    name: "Ask your stack",
    url: "https://demo-uni3q8.us-east-1.xata.sh/db/askyourstack",
    lookup_table: "content",
}];
