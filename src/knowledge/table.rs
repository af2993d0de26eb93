//! Default agency FAQ table

use super::{IntentTag, KnowledgeEntry};

/// Built-in entries, in tie-break order.
pub fn default_entries() -> Vec<KnowledgeEntry> {
    vec![
        KnowledgeEntry::new(
            "Identity",
            &[
                "who are you",
                "what is your name",
                "voice assistant",
                "who made you",
                "are you real",
            ],
            "I'm the studio's chat assistant. I'm here to walk you through our services and get your next project started.",
            IntentTag::Faq,
        ),
        KnowledgeEntry::new(
            "Services",
            &[
                "service",
                "services",
                "offer",
                "do",
                "build",
                "create",
                "what can you do",
                "capabilities",
                "help me",
            ],
            "We offer a full suite of digital services: premium web design, custom AI agents, Next.js applications and SEO. What are you looking to build?",
            IntentTag::ServiceQuery,
        ),
        KnowledgeEntry::new(
            "Services",
            &[
                "web design",
                "website",
                "design",
                "ui",
                "ux",
                "landing page",
                "redesign",
                "corporate site",
                "portfolio",
            ],
            "We design fast, high-converting websites, from a single landing page to a full corporate redesign.",
            IntentTag::ServiceQuery,
        ),
        KnowledgeEntry::new(
            "Services",
            &[
                "ecommerce",
                "shop",
                "store",
                "online store",
                "shopify",
                "sell online",
                "cart",
            ],
            "Yes, we build e-commerce platforms on Next.js or Shopify, with secure payments and inventory management.",
            IntentTag::ServiceQuery,
        ),
        KnowledgeEntry::new(
            "Services",
            &["maintenance", "support", "update", "fix", "hosting", "manage"],
            "We offer ongoing maintenance packages that keep your site secure, fast and up to date after launch.",
            IntentTag::ServiceQuery,
        ),
        KnowledgeEntry::new(
            "Services",
            &[
                "development",
                "coding",
                "react",
                "nextjs",
                "app",
                "web app",
                "saas",
                "software",
                "mobile app",
                "platform",
            ],
            "We build scalable SaaS platforms and web applications with Next.js, React and Tailwind.",
            IntentTag::ServiceQuery,
        ),
        KnowledgeEntry::new(
            "Services",
            &["mobile", "ios", "android", "phone app", "native"],
            "Our web apps work on every phone. For native iOS and Android apps we use React Native, best scoped on a call.",
            IntentTag::ServiceQuery,
        ),
        KnowledgeEntry::new(
            "Services",
            &[
                "ai",
                "bot",
                "chatbot",
                "agent",
                "automation",
                "voice",
                "intelligence",
                "openai",
                "llm",
                "gpt",
            ],
            "We build custom AI solutions: support chatbots (like me), voice agents for lead qualifying, and internal workflow automation.",
            IntentTag::ServiceQuery,
        ),
        KnowledgeEntry::new(
            "Services",
            &[
                "seo",
                "ranking",
                "google",
                "search",
                "traffic",
                "marketing",
                "content",
            ],
            "Our SEO work is data-driven: site structure, content and performance tuned to rank higher and bring in organic leads.",
            IntentTag::ServiceQuery,
        ),
        KnowledgeEntry::new(
            "Pricing",
            &[
                "price",
                "prices",
                "cost",
                "costs",
                "how much",
                "budget",
                "rates",
                "fee",
                "quote",
                "pricing",
                "packages",
            ],
            "Pricing is tailored to the project.\n- Basic websites: from $1,000\n- Custom web apps: from $5,000\n- AI solutions: from $5,000\nDo you have a budget in mind?",
            IntentTag::PricingQuery,
        ),
        KnowledgeEntry::new(
            "Pricing",
            &[
                "expensive",
                "cheap",
                "affordable",
                "discount",
                "negotiable",
                "too much",
            ],
            "We aren't the cheapest, but we focus on quality and return on investment. We can usually tailor a scope to a realistic budget.",
            IntentTag::PricingQuery,
        ),
        KnowledgeEntry::new(
            "Pricing",
            &["hourly", "rate", "hour", "pay per hour"],
            "We work on a fixed-project basis so you know the total upfront. Ongoing retainers start at $100/hr.",
            IntentTag::PricingQuery,
        ),
        KnowledgeEntry::new(
            "Pricing",
            &["payment", "payment plan", "installments", "upfront", "deposit"],
            "Standard terms are 50% upfront and 50% on completion. Larger projects can use milestone payments.",
            IntentTag::PricingQuery,
        ),
        KnowledgeEntry::new(
            "Timeline",
            &[
                "time",
                "long",
                "duration",
                "timeline",
                "when",
                "deadline",
                "how fast",
                "turnaround",
            ],
            "Typical timelines:\n- Landing pages: 1-2 weeks\n- Full websites: 2-4 weeks\n- Custom apps and AI: 4-12 weeks\nComplexity moves these around.",
            IntentTag::Faq,
        ),
        KnowledgeEntry::new(
            "Timeline",
            &[
                "rush",
                "asap",
                "emergency",
                "hurry",
                "urgent",
                "quickly",
                "fast",
            ],
            "Rush projects are sometimes possible depending on our schedule. A rush fee may apply.",
            IntentTag::LeadCollection,
        ),
        KnowledgeEntry::new(
            "Timeline",
            &[
                "start",
                "begin",
                "kickoff",
                "availability",
                "when can you start",
            ],
            "We usually book two weeks ahead. If you're ready we can hold a slot for you today.",
            IntentTag::LeadCollection,
        ),
        KnowledgeEntry::new(
            "Lead",
            &[
                "contact",
                "email",
                "phone",
                "reach",
                "call",
                "hire",
                "start project",
                "book",
                "meeting",
                "consultation",
            ],
            "Excellent. I'll need a few details to set up your consultation.",
            IntentTag::LeadCollection,
        ),
        KnowledgeEntry::new(
            "General",
            &[
                "hello",
                "hi",
                "hey",
                "greetings",
                "good morning",
                "good evening",
                "yo",
            ],
            "Hello! What are you looking to build today?",
            IntentTag::GeneralQuery,
        ),
        KnowledgeEntry::new(
            "Social",
            &[
                "how are you",
                "how are you doing",
                "what's up",
                "how is it going",
            ],
            "Running at full speed and ready to help your business grow.",
            IntentTag::GeneralQuery,
        ),
        KnowledgeEntry::new(
            "Social",
            &[
                "thank you",
                "thanks",
                "thx",
                "cool",
                "awesome",
                "great",
                "good job",
            ],
            "Glad I could help! Anything else you'd like to know?",
            IntentTag::GeneralQuery,
        ),
        KnowledgeEntry::new(
            "Social",
            &["bye", "goodbye", "see ya", "cya", "leave", "exit"],
            "Goodbye! We look forward to working with you.",
            IntentTag::GeneralQuery,
        ),
    ]
}
