//! The canned report returned by [`SampleProvider`](crate::provider::SampleProvider).

use crate::types::{
    AnalysisDocument, ImportantContexts, KeyConcept, LearningStructure, MainPoint, Metadata,
    StudyQuestion, StudyTechnique,
};

pub fn sample_document(date: &str) -> AnalysisDocument {
    AnalysisDocument {
        executive_summary: "Esta palestra aborda a importância de fazer coisas que não escalam no início de uma startup, a necessidade dos fundadores aprenderem a fazer vendas, a importância de cobrar pelo seu produto e a necessidade de trabalhar de trás para frente a partir de seus objetivos.".into(),
        key_concepts: vec![
            KeyConcept {
                title: "Fazer coisas que não escalam".into(),
                description: "Ações manuais e intensivas em tempo que não podem ser facilmente automatizadas ou multiplicadas, mas que são cruciais para o crescimento inicial de uma startup.".into(),
                importance: "Essas ações ajudam a construir um produto com os clientes e a recrutar manualmente os primeiros clientes.".into(),
                difficulty: "Intermediário".into(),
                example: "Os fundadores da Airbnb visitaram pessoalmente os anfitriões para entender suas necessidades e melhorar o produto.".into(),
                tip: Some("Leia o ensaio 'Fazer coisas que não escalam' de Paul Graham.".into()),
            },
            KeyConcept {
                title: "Vendas".into(),
                description: "Processo de persuadir um cliente em potencial a comprar seu produto ou serviço.".into(),
                importance: "As vendas são cruciais para o crescimento e a sobrevivência de uma startup.".into(),
                difficulty: "Intermediário".into(),
                example: "Os fundadores da Brex recrutaram seus primeiros 10 clientes diretamente de outras startups no Y Combinator.".into(),
                tip: Some("Pratique vendas com clientes em potencial e peça feedback.".into()),
            },
        ],
        main_points: vec![
            MainPoint {
                title: "Fazer coisas que não escalam".into(),
                description: "As startups não decolam por si só, os fundadores precisam fazer isso acontecer. Isso muitas vezes envolve fazer coisas que não escalam, como recrutar manualmente os primeiros clientes.".into(),
                context: "Estágio inicial de uma startup".into(),
                application: "Identifique ações que podem ajudar sua startup a crescer, mesmo que não sejam escaláveis.".into(),
                memory_technique: "Lembre-se do exemplo da Airbnb".into(),
            },
            MainPoint {
                title: "Vendas".into(),
                description: "Os fundadores precisam aprender a fazer vendas para entender seus clientes e ter controle total sobre o destino de sua startup.".into(),
                context: "Estágio inicial de uma startup".into(),
                application: "Pratique vendas com clientes em potencial e peça feedback.".into(),
                memory_technique: "Lembre-se do exemplo da Brex".into(),
            },
        ],
        important_contexts: ImportantContexts {
            title: "Startups".into(),
            description: "Empresas em estágio inicial que buscam resolver um problema com uma solução inovadora.".into(),
            relevance: "Este conteúdo é especialmente relevante para fundadores de startups que estão no estágio inicial de construção de seu produto e recrutamento de seus primeiros clientes.".into(),
            examples: vec!["Airbnb".into(), "Brex".into()],
        },
        learning_structure: LearningStructure {
            prerequisites: vec![
                "Conhecimento básico de startups".into(),
                "Conhecimento básico de vendas".into(),
            ],
            learning_sequence: vec![
                "Entenda o conceito de fazer coisas que não escalam".into(),
                "Aprenda a importância das vendas e como fazê-las".into(),
                "Pratique vendas com clientes em potencial".into(),
            ],
        },
        study_techniques: vec![StudyTechnique {
            name: "Estudo de caso".into(),
            when_to_use: "Quando quiser entender como os conceitos são aplicados na prática.".into(),
            effectiveness: "Alta".into(),
        }],
        study_questions: vec![
            StudyQuestion {
                question: "Por que é importante fazer coisas que não escalam no início de uma startup?".into(),
                answer: "Fazer coisas que não escalam ajuda a construir um produto com os clientes e a recrutar manualmente os primeiros clientes.".into(),
                level: "Intermediário".into(),
                tip: Some("Pense no exemplo da Airbnb".into()),
            },
            StudyQuestion {
                question: "Por que os fundadores de uma startup devem aprender a fazer vendas?".into(),
                answer: "As vendas são cruciais para o crescimento e a sobrevivência de uma startup. Os fundadores precisam aprender a fazer vendas para entender seus clientes e ter controle total sobre o destino de sua startup.".into(),
                level: "Intermediário".into(),
                tip: Some("Pense no exemplo da Brex".into()),
            },
        ],
        metadata: Metadata {
            date: date.to_string(),
            word_count: 4702,
            segments: 30,
            source: "OpenAI".into(),
        },
    }
}
