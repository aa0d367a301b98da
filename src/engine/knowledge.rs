/// Static topic answers, matched by lowercase substring in declaration order.
/// Broad keys such as "ai" come after the topics they would otherwise shadow.
pub const KNOWLEDGE_BASE: &[(&str, &str)] = &[
    (
        "machine learning",
        "Machine Learning is a subset of artificial intelligence that enables computers to learn and improve from experience without being explicitly programmed.

Key concepts:
• Supervised Learning - Learning from labeled data
• Unsupervised Learning - Finding patterns in unlabeled data
• Neural Networks - Inspired by the human brain
• Deep Learning - Multiple layers of neural networks

Applications include image recognition, natural language processing, recommendation systems, and autonomous vehicles.",
    ),
    (
        "deep learning",
        "Deep Learning is a subset of machine learning that uses artificial neural networks with multiple layers (hence \"deep\") to progressively extract higher-level features from raw input.

Key features:
• Uses neural networks with many layers
• Automatically learns feature representations
• Excels at tasks like image recognition, speech recognition, and NLP
• Requires large amounts of data and computational power

Popular frameworks: TensorFlow, PyTorch, Keras",
    ),
    (
        "neural network",
        "A Neural Network is a computing system inspired by biological neural networks in animal brains. It consists of interconnected nodes (neurons) organized in layers.

Structure:
• Input Layer - Receives data
• Hidden Layers - Process information
• Output Layer - Produces results

Types: Feedforward, Convolutional (CNN), Recurrent (RNN), Transformer",
    ),
    (
        "nlp",
        "Natural Language Processing (NLP) is a branch of AI that helps computers understand, interpret, and manipulate human language.

Key tasks:
• Text Classification
• Sentiment Analysis
• Named Entity Recognition (NER)
• Machine Translation
• Question Answering
• Text Summarization

Popular models: BERT, GPT, T5, RoBERTa",
    ),
    (
        "python",
        "Python is a high-level, interpreted programming language known for its simplicity and readability. It's extremely popular for:

• Data Science & Machine Learning
• Web Development
• Automation & Scripting
• Scientific Computing

Key libraries: NumPy, Pandas, TensorFlow, PyTorch, Scikit-learn, Django, Flask",
    ),
    (
        "ai",
        "Artificial Intelligence (AI) is the simulation of human intelligence by machines. It includes:

• Machine Learning - Learning from data
• Deep Learning - Neural networks
• Natural Language Processing - Understanding text
• Computer Vision - Understanding images
• Robotics - Physical AI systems

AI is transforming industries from healthcare to finance to transportation.",
    ),
    (
        "data science",
        "Data Science is an interdisciplinary field that uses scientific methods, processes, and algorithms to extract knowledge and insights from structured and unstructured data.

Key skills:
• Statistics & Mathematics
• Programming (Python, R)
• Data Visualization
• Machine Learning
• Domain Knowledge

Career paths: Data Scientist, ML Engineer, Data Analyst, AI Researcher",
    ),
    (
        "chatgpt",
        "ChatGPT is a large language model developed by OpenAI based on the GPT (Generative Pre-trained Transformer) architecture.

Features:
• Understands and generates human-like text
• Can answer questions, write code, create content
• Trained on vast amounts of internet text
• Uses transformer architecture
• Supports conversational interactions

You're talking to a chatbot inspired by ChatGPT right now!",
    ),
];

/// First topic whose key occurs in the case-folded message.
pub fn lookup(message_lower: &str) -> Option<(&'static str, &'static str)> {
    KNOWLEDGE_BASE
        .iter()
        .find(|(topic, _)| message_lower.contains(topic))
        .copied()
}

/// The one-line form of an answer, used when the session asked for short answers.
pub fn short_form(answer: &str) -> &str {
    answer.lines().next().unwrap_or(answer)
}

pub const GREETING_WORDS: &[&str] = &["hello", "hi", "hey", "greetings"];
pub const THANKS_WORDS: &[&str] = &["thank", "thanks"];
pub const HELP_WORDS: &[&str] = &["help", "assist"];
pub const CAPABILITY_PHRASES: &[&str] = &["what can you do", "your capabilities"];

pub const GREETING_REPLY: &str = "Hello! I'm here to help you learn about AI, Machine Learning, Deep Learning, and related topics. What would you like to know?";

pub const THANKS_REPLY: &str = "You're welcome! Feel free to ask me anything about AI, ML, Deep Learning, NLP, Data Science, or programming!";

pub const HELP_REPLY: &str = "I can help you with:
• Machine Learning concepts
• Deep Learning & Neural Networks
• Natural Language Processing (NLP)
• Python programming
• Data Science
• Artificial Intelligence
• ChatGPT and LLMs

Just ask me a question about any of these topics!";

pub const CAPABILITIES_REPLY: &str = "I can:
✓ Answer questions about AI, ML, and Deep Learning
✓ Explain programming concepts (especially Python)
✓ Discuss data science topics
✓ Provide information about NLP and neural networks
✓ Help you understand ChatGPT and LLMs
✓ Detect sentiment and intent in your messages
✓ Extract entities like emails and dates

Try asking me about any of these topics!";
