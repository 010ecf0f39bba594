//! Built-in code scenarios for the snark factory.

use gaccia_core::Language;

/// A code sample, a one-line quality summary, and the language it is in.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub language: Language,
    pub code: &'static str,
    pub summary: &'static str,
}

/// The rejoinder each side fires back with after being roasted.
pub struct Retort {
    pub code: &'static str,
    pub summary: &'static str,
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        language: Language::TypeScript,
        code: "function fibonacci(n: number): number {\n    if (n <= 1) return n;\n    return fibonacci(n - 1) + fibonacci(n - 2);\n}",
        summary: "Basic recursive implementation with no optimization",
    },
    Scenario {
        language: Language::Python,
        code: "def fibonacci(n):\n    if n <= 1:\n        return n\n    return fibonacci(n - 1) + fibonacci(n - 2)",
        summary: "Simple recursive approach, no type hints",
    },
    Scenario {
        language: Language::TypeScript,
        code: "interface User {\n    id: number;\n    name: string;\n    email?: string;\n}\n\nclass UserManager {\n    private users: User[] = [];\n\n    addUser(user: User): void {\n        this.users.push(user);\n    }\n}",
        summary: "Object-oriented design with interfaces and type safety",
    },
    Scenario {
        language: Language::Python,
        code: "class UserManager:\n    def __init__(self):\n        self.users = []\n\n    def add_user(self, user):\n        self.users.append(user)",
        summary: "Duck typing approach with dynamic attributes",
    },
    Scenario {
        language: Language::TypeScript,
        code: "const processData = async (data: unknown[]): Promise<string[]> => {\n    return data\n        .filter((item): item is string => typeof item === 'string')\n        .map(item => item.toUpperCase());\n};",
        summary: "Functional style with type guards and async processing",
    },
    Scenario {
        language: Language::Python,
        code: "def process_data(data):\n    return [item.upper() for item in data if isinstance(item, str)]",
        summary: "Pythonic list comprehension with runtime type checking",
    },
];

/// Scenario for a 1-based round number, cycling through the list.
pub fn for_round(round: usize) -> &'static Scenario {
    &SCENARIOS[round.saturating_sub(1) % SCENARIOS.len()]
}

/// Caricature of `home`'s rival that `home`'s commentator answers with.
pub fn retort(home: Language) -> Retort {
    match home {
        Language::Python => Retort {
            code: "TypeScript boilerplate with 47 interfaces",
            summary: "Over-engineered type gymnastics",
        },
        Language::TypeScript => Retort {
            code: "def mystery_function(x): return x + 1",
            summary: "Runtime error waiting to happen",
        },
    }
}
